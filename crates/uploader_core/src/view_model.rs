#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub selected_name: Option<String>,
    /// Mirrors the Send button: disabled while loading or with nothing selected.
    pub upload_enabled: bool,
    pub files: Vec<String>,
    pub listing_fetched_utc: Option<String>,
}
