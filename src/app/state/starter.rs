pub struct StarterState {
    pub(in crate::app) plan_input: String,
    pub(in crate::app) recent: Vec<String>,
    /// Shown after a viewer closed without playing, e.g. an empty plan.
    pub(in crate::app) notice: Option<String>,
}
