use log::LevelFilter;

/// Initial window and logging configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Prefix of the window title; the current mode is appended.
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "DRMS".to_string(),
            width: 1024,
            height: 600,
            vsync: true,
            log_level: LevelFilter::Info,
        }
    }
}

/// Entry point.  Configure with the builder methods, then call [`App::run`].
#[derive(Default)]
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Installs the logger and runs the event loop until the window closes.
    pub fn run(self) -> anyhow::Result<()> {
        crate::logging::init(self.config.log_level)?;
        crate::runner::run_internal(self.config)
    }
}
