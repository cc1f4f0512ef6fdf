use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "layoutpack_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn classifies_by_extension() {
    let png = InputFile::from_path("a/photo.PNG").unwrap();
    assert_eq!(png.name, "photo.PNG");
    assert_eq!(png.format, image::ImageFormat::Png);
    assert_eq!(png.mime_type(), "image/png");

    let jpg = InputFile::from_path("b/IMG_0001.jpeg").unwrap();
    assert_eq!(jpg.mime_type(), "image/jpeg");

    assert!(InputFile::from_path("notes.txt").is_none());
    assert!(InputFile::from_path("no_extension").is_none());
}

#[test]
fn filter_images_keeps_order() {
    let files = filter_images(["z.png", "readme.md", "a.jpg", "b.gif"]);
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["z.png", "a.jpg", "b.gif"]);
}

#[test]
fn directory_children_are_sorted_and_filtered() {
    let dir = temp_dir("intake_dir");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    for name in ["c.png", "a.jpg", "b.txt", "nested/d.png"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    let files = collect_inputs(&[&dir]).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a.jpg", "c.png"]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn explicit_files_keep_argument_order() {
    let dir = temp_dir("intake_files");
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["b.png", "a.png", "skip.csv"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    let files =
        collect_inputs(&[dir.join("b.png"), dir.join("skip.csv"), dir.join("a.png")]).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["b.png", "a.png"]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_path_is_an_error() {
    let dir = temp_dir("intake_missing");
    assert!(collect_inputs(&[dir.join("nope.png")]).is_err());
}

#[test]
fn empty_selection_is_rejected_by_require_non_empty() {
    assert!(require_non_empty(&[]).is_err());
    let one = filter_images(["x.png"]);
    assert!(require_non_empty(&one).is_ok());
}
