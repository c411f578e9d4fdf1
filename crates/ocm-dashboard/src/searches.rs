//! Saved search page view-model and the default suggested templates.

use serde::{Deserialize, Serialize};

use crate::aggregate::{SavedSearchCount, SuggestedSearchCount};
use crate::overview::search_href;
use crate::types::SuggestedQueryTemplate;

/// Suggested templates offered when none are configured.
#[must_use]
pub fn default_suggested_templates() -> Vec<SuggestedQueryTemplate> {
    vec![
        SuggestedQueryTemplate {
            id: "search.suggested.workloads.name".to_string(),
            name: "Workloads".to_string(),
            description: "Show workloads running on your fleet".to_string(),
            search_text: "kind:daemonset,deployment,job,statefulset,replicaset".to_string(),
        },
        SuggestedQueryTemplate {
            id: "search.suggested.unhealthy.name".to_string(),
            name: "Unhealthy pods".to_string(),
            description: "Show pods with unhealthy status".to_string(),
            search_text: "kind:pod status:Pending,Error,Failed,Terminating,ImagePullBackOff,CrashLoopBackOff,RunContainerError,ContainerCreating".to_string(),
        },
        SuggestedQueryTemplate {
            id: "search.suggested.createdLastHour.name".to_string(),
            name: "Created last hour".to_string(),
            description: "Search for resources created within the last hour".to_string(),
            search_text: "created:hour".to_string(),
        },
    ]
}

/// Action offered on a search card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardAction {
    /// Edit the saved search.
    Edit,
    /// Share a link to the search.
    Share,
    /// Delete the saved search.
    Delete,
}

/// A search shown as a count card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCard {
    /// Saved search or template id.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Search text run when the card is clicked.
    pub search_text: String,
    /// Link to the search results.
    pub href: String,
    /// Number of matching resources.
    pub count: u64,
    /// Actions available on the card.
    pub actions: Vec<CardAction>,
    /// Whether the card is decorated with the template icon.
    pub has_icon: bool,
}

impl From<SavedSearchCount> for SearchCard {
    fn from(saved: SavedSearchCount) -> Self {
        let query = saved.query;
        Self {
            href: search_href(&query.search_text),
            id: query.id,
            title: query.name,
            description: query.description,
            search_text: query.search_text,
            count: saved.count,
            actions: vec![CardAction::Edit, CardAction::Share, CardAction::Delete],
            has_icon: false,
        }
    }
}

impl From<SuggestedSearchCount> for SearchCard {
    fn from(suggested: SuggestedSearchCount) -> Self {
        let template = suggested.template;
        Self {
            href: search_href(&template.search_text),
            id: template.id,
            title: template.name,
            description: template.description,
            search_text: template.search_text,
            count: suggested.count,
            actions: vec![CardAction::Share],
            has_icon: true,
        }
    }
}

/// Saved searches and suggested templates with their counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchesModel {
    /// The user's saved searches.
    pub saved: Vec<SearchCard>,
    /// Suggested templates.
    pub suggested: Vec<SearchCard>,
}

impl SavedSearchesModel {
    /// Compose the page from paired counts.
    #[must_use]
    pub fn compose(saved: Vec<SavedSearchCount>, suggested: Vec<SuggestedSearchCount>) -> Self {
        Self {
            saved: saved.into_iter().map(SearchCard::from).collect(),
            suggested: suggested.into_iter().map(SearchCard::from).collect(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty() && self.suggested.is_empty()
    }
}
