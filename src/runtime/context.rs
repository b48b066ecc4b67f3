use crate::config::Settings;

use super::{AnalysisService, IoService};

#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    io_service: IoService,
    analysis_service: AnalysisService,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            analysis_service: AnalysisService::new(settings.clone()),
            io_service: IoService,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }

    pub fn analysis_service(&self) -> &AnalysisService {
        &self.analysis_service
    }
}
