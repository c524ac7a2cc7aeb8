use std::path::Path;

/// Name of the folder containing `dir`, used as the camera/site tag
/// (`.../Window/experiment` is tagged `Window`).
pub fn parent_tag(dir: &Path) -> Option<String> {
    dir.parent()?
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_parent_folder_name() {
        assert_eq!(
            parent_tag(Path::new("/data/EXP_012/Window/experiment")).as_deref(),
            Some("Window")
        );
    }

    #[test]
    fn root_has_no_tag() {
        assert_eq!(parent_tag(Path::new("/")), None);
        assert_eq!(parent_tag(Path::new("/top")), None);
    }
}
