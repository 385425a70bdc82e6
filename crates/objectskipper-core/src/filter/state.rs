//! Live filter state

/// Which object is streaming and whether its commands are suppressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Object whose commands are currently streaming, empty if unknown
    pub current_object_id: String,
    /// Whether commands are currently being suppressed
    pub filtering: bool,
}

impl FilterState {
    /// Create the start-of-process state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current object id, `None` until a boundary comment has been seen
    pub fn current_object(&self) -> Option<&str> {
        if self.current_object_id.is_empty() {
            None
        } else {
            Some(&self.current_object_id)
        }
    }

    /// Enter a new object
    pub fn enter_object(&mut self, id: String, filtering: bool) {
        self.current_object_id = id;
        self.filtering = filtering;
    }
}
