// Small helpers shared across components.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::File;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// `web-sys` 0.3 does not generate a binding for `File.webkitRelativePath`,
/// so read the property reflectively (returns "" when absent).
pub trait FileExt {
    fn webkit_relative_path(&self) -> String;
}

impl FileExt for File {
    fn webkit_relative_path(&self) -> String {
        Reflect::get(self, &JsValue::from_str("webkitRelativePath"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }
}

/// Folder part of a directory-picker relative path ("set-a/sub/img.png" ->
/// "set-a/sub"). Files without a folder component land in a root bucket.
pub fn folder_of(relative_path: &str) -> String {
    match relative_path.rsplit_once('/') {
        Some((folder, _)) if !folder.is_empty() => folder.to_string(),
        _ => "Root".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::folder_of;

    #[test]
    fn folder_of_strips_the_file_name() {
        assert_eq!(folder_of("set-a/img.png"), "set-a");
        assert_eq!(folder_of("a/b/img.png"), "a/b");
    }

    #[test]
    fn folder_of_falls_back_to_root() {
        assert_eq!(folder_of("img.png"), "Root");
        assert_eq!(folder_of("/img.png"), "Root");
    }
}
