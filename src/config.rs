/// Naming conventions and folder layout of an experiment tree.
///
/// There is no configuration file: these defaults reflect the lab's fixed
/// conventions and individual fields are overridden from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Extension filter used by every scan (case-sensitive, with the dot).
    pub extension: String,
    /// Separator between index, label and tag.
    pub separator: String,
    /// Minimum number of digits of the sequence index.
    pub pad_width: usize,
    /// Camera folders directly below the experiment root.
    pub cameras: Vec<String>,
    /// Role folders below each camera folder.
    pub roles: Vec<String>,
    /// Role whose images alternate between single and double light source.
    pub split_role: String,
    pub single_dir: String,
    pub double_dir: String,
    /// Cameras whose images are collected into the DaVis folders.
    pub davis_cameras: Vec<String>,
    pub davis_experiment_dir: String,
    pub davis_calibration_dir: String,
    /// Role folder copied into `davis_calibration_dir`.
    pub calibration_role: String,
    /// Subfolders of the top view / DEM split.
    pub topview_dir: String,
    pub dem_dir: String,
    pub split_label: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            extension: ".JPG".to_string(),
            separator: "_".to_string(),
            pad_width: 4,
            cameras: to_strings(&["Door", "Top", "Window"]),
            roles: to_strings(&["calibration", "experiment", "shade", "silicone"]),
            split_role: "experiment".to_string(),
            single_dir: "single".to_string(),
            double_dir: "double".to_string(),
            davis_cameras: to_strings(&["Door", "Window"]),
            davis_experiment_dir: "davis_experiment".to_string(),
            davis_calibration_dir: "davis_calibration".to_string(),
            calibration_role: "calibration".to_string(),
            topview_dir: "TOPVIEW".to_string(),
            dem_dir: "DEM".to_string(),
            split_label: "min".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_lab_layout() {
        let config = WorkflowConfig::default();
        assert_eq!(config.extension, ".JPG");
        assert_eq!(config.pad_width, 4);
        assert_eq!(config.cameras, ["Door", "Top", "Window"]);
        assert_eq!(config.davis_cameras, ["Door", "Window"]);
        assert!(config.roles.contains(&config.split_role));
        assert!(config.roles.contains(&config.calibration_role));
    }
}
