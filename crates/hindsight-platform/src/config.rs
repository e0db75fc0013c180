/// Knobs for the headless runner.
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    /// Print the frame after every handled command.
    pub echo_frames: bool,
    /// Stop after this many handled commands.
    pub max_events: Option<usize>,
    /// Written between echoed frames, if set.
    pub separator: Option<String>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            echo_frames: true,
            max_events: None,
            separator: Some("--".to_string()),
        }
    }
}

impl HeadlessConfig {
    pub fn quiet() -> Self {
        Self {
            echo_frames: false,
            ..Self::default()
        }
    }
}
