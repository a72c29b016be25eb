//! Event query filter.

/// Optional constraints on which events are returned.
///
/// Unset fields (and fields set to an empty string) add no query
/// parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub project: Option<String>,
    pub stage: Option<String>,
    pub service: Option<String>,

    /// Full event type name, sent as `type`.
    pub event_type: Option<String>,

    /// Sent as `keptnContext`.
    pub keptn_context: Option<String>,

    /// Sent as `eventID`.
    pub event_id: Option<String>,

    /// Events per page requested from the datastore.
    pub page_size: Option<u32>,

    /// Stop after this many pages. `None` or `0` follows the cursor to the
    /// end.
    pub number_of_pages: Option<u32>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn keptn_context(mut self, keptn_context: impl Into<String>) -> Self {
        self.keptn_context = Some(keptn_context.into());
        self
    }

    pub fn event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn number_of_pages(mut self, pages: u32) -> Self {
        self.number_of_pages = Some(pages);
        self
    }

    /// The page cap, or `None` when pagination is unbounded.
    pub fn page_cap(&self) -> Option<u32> {
        self.number_of_pages.filter(|pages| *pages > 0)
    }

    /// Query parameters for the set fields.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let page_size = self.page_size.map(|size| size.to_string());
        [
            ("project", self.project.as_ref()),
            ("stage", self.stage.as_ref()),
            ("service", self.service.as_ref()),
            ("keptnContext", self.keptn_context.as_ref()),
            ("eventID", self.event_id.as_ref()),
            ("type", self.event_type.as_ref()),
            ("pageSize", page_size.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.clone()))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_pairs() {
        assert!(EventFilter::new().query_pairs().is_empty());
    }

    #[test]
    fn test_all_fields() {
        let filter = EventFilter::new()
            .project("sockshop")
            .stage("dev")
            .service("carts")
            .event_type("sh.keptn.event.deployment.finished")
            .keptn_context("ctx-1")
            .event_id("evt-1")
            .page_size(50);

        assert_eq!(
            filter.query_pairs(),
            vec![
                ("project", "sockshop".to_string()),
                ("stage", "dev".to_string()),
                ("service", "carts".to_string()),
                ("keptnContext", "ctx-1".to_string()),
                ("eventID", "evt-1".to_string()),
                ("type", "sh.keptn.event.deployment.finished".to_string()),
                ("pageSize", "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let filter = EventFilter::new().project("").service("carts");
        assert_eq!(filter.query_pairs(), vec![("service", "carts".to_string())]);
    }

    #[test]
    fn test_page_cap() {
        assert_eq!(EventFilter::new().page_cap(), None);
        assert_eq!(EventFilter::new().number_of_pages(0).page_cap(), None);
        assert_eq!(EventFilter::new().number_of_pages(3).page_cap(), Some(3));
    }
}
