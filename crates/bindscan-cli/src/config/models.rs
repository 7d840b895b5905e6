use bindscan::engine::config::ResolveConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub ids_path: PathBuf,
    pub documents_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: ResolveConfig,
}
