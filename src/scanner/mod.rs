use crate::error::{CardScanError, Result};
use base64::Engine;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn image_info(path: &Path) -> ImageInfo {
    ImageInfo {
        path: path.to_path_buf(),
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

/// 指定パス（ファイルまたはフォルダ）から画像を集める
///
/// 明示されたファイルはそのまま、フォルダは直下の画像をファイル名順で追加する。
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<ImageInfo>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            images.push(image_info(path));
        } else {
            return Err(CardScanError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(CardScanError::FileNotFound(folder.display().to_string()));
    }

    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_path(e.path()))
        .map(|e| image_info(e.path()))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 拡張子からMIMEタイプを決める
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "image/jpeg",
    }
}

/// 画像ファイルをData URLとして読み込む
pub fn load_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| CardScanError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(CardScanError::ImageLoad(format!("{}: empty file", path.display())));
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", mime_type_for(path), encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a.jpg")));
        assert!(is_image_path(Path::new("a.JPG")));
        assert!(is_image_path(Path::new("a.jpeg")));
        assert!(is_image_path(Path::new("a.png")));
        assert!(is_image_path(Path::new("a.webp")));
        assert!(!is_image_path(Path::new("a.txt")));
        assert!(!is_image_path(Path::new("a.pdf")));
        assert!(!is_image_path(Path::new("noext")));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(CardScanError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images_sorted() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("a.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("b.jpeg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.PNG", "b.jpeg", "c.jpg"]);
    }

    #[test]
    fn test_collect_images_mixed() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("cards");
        std::fs::create_dir(&sub).unwrap();
        File::create(sub.join("one.jpg")).unwrap();
        let single = dir.path().join("single.png");
        File::create(&single).unwrap();

        let images = collect_images(&[single.clone(), sub]).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].path, single);
        assert_eq!(images[1].file_name, "one.jpg");
    }

    #[test]
    fn test_collect_images_missing_path() {
        let result = collect_images(&[PathBuf::from("/nonexistent/card.jpg")]);
        assert!(matches!(result, Err(CardScanError::FileNotFound(_))));
    }

    #[test]
    fn test_load_data_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, b"abc").unwrap();

        let data_url = load_data_url(&path).unwrap();
        assert_eq!(data_url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_load_data_url_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        File::create(&path).unwrap();
        assert!(matches!(load_data_url(&path), Err(CardScanError::ImageLoad(_))));
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("x.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("x.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("x")), "image/jpeg");
    }
}
