use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, Rgb};
use propresize::{EntryOutcome, JobConfig, ResizeError};
use tempfile::TempDir;

fn save_image(dir: &Path, name: &str, width: u32, height: u32, format: image::ImageFormat) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    });
    let path = dir.join(name);
    DynamicImage::ImageRgb8(img)
        .save_with_format(&path, format)
        .unwrap();
    path
}

fn save_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    save_image(dir, name, width, height, image::ImageFormat::Png)
}

fn dirs() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn resizes_image_with_matching_ratio() {
    let (source, destination) = dirs();
    save_png(source.path(), "photo.png", 800, 600);

    let job = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap();
    let summary = job.run().unwrap();

    let output = destination.path().join("photo.png");
    let resized = image::open(&output).unwrap();
    assert_eq!((resized.width(), resized.height()), (640, 480));
    assert_eq!(summary.resized, 1);
    assert_eq!(summary.scanned, 1);
}

#[test]
fn keeps_image_already_at_target_size() {
    let (source, destination) = dirs();
    save_png(source.path(), "photo.png", 640, 480);

    JobConfig::builder(source.path(), destination.path())
        .with_width(640)
        .with_height(480)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let resized = image::open(destination.path().join("photo.png")).unwrap();
    assert_eq!((resized.width(), resized.height()), (640, 480));
}

#[test]
fn skips_image_with_other_ratio() {
    let (source, destination) = dirs();
    save_png(source.path(), "photo.png", 800, 600);

    let summary = JobConfig::builder(source.path(), destination.path())
        .with_width(320)
        .with_height(200)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert!(!destination.path().join("photo.png").exists());
    assert_eq!(summary.disproportional, 1);
    assert_eq!(summary.resized, 0);
}

#[test]
fn ignores_non_image_files() {
    let (source, destination) = dirs();
    std::fs::write(source.path().join("readme.txt"), "hello").unwrap();
    std::fs::write(source.path().join("archive.zip"), [0x50, 0x4B, 0x03, 0x04]).unwrap();
    save_png(source.path(), "mixed.Png", 800, 600);

    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.not_images, 3);
    assert_eq!(std::fs::read_dir(destination.path()).unwrap().count(), 0);
}

#[test]
fn does_not_descend_into_subdirectories() {
    let (source, destination) = dirs();
    let nested = source.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    save_png(&nested, "deep.png", 800, 600);

    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.not_images, 1);
    assert!(!destination.path().join("deep.png").exists());
}

#[test]
fn skips_undecodable_image_and_continues() {
    let (source, destination) = dirs();
    std::fs::write(source.path().join("broken.png"), b"renamed text file").unwrap();
    save_png(source.path(), "good.png", 400, 300);

    let mut outcomes = Vec::new();
    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run_with(|path, outcome| {
            outcomes.push((path.file_name().unwrap().to_owned(), outcome.clone()));
        })
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.resized, 1);
    assert!(destination.path().join("good.png").exists());
    assert!(!destination.path().join("broken.png").exists());
    assert!(outcomes
        .iter()
        .any(|(name, outcome)| name == "broken.png"
            && matches!(outcome, EntryOutcome::Failed { .. })));
}

#[test]
fn missing_source_fails_to_build() {
    let root = TempDir::new().unwrap();
    let destination = root.path().join("out");

    let err = JobConfig::builder(root.path().join("absent"), &destination)
        .build()
        .unwrap_err();

    assert!(matches!(err, ResizeError::SourceMissing { .. }));
    assert!(!destination.exists());
}

#[test]
fn missing_destination_aborts_run() {
    let (source, root) = dirs();
    save_png(source.path(), "photo.png", 800, 600);
    let destination = root.path().join("not-created");

    let err = JobConfig::builder(source.path(), &destination)
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, ResizeError::Write { .. }));
    assert!(!destination.exists());
}

#[test]
fn source_that_is_a_file_fails_on_run() {
    let (source, destination) = dirs();
    let file = save_png(source.path(), "photo.png", 8, 6);

    let job = JobConfig::builder(&file, destination.path()).build().unwrap();
    assert!(matches!(job.run(), Err(ResizeError::IoError(_))));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let (source, destination) = dirs();
    save_png(source.path(), "a.png", 800, 600);
    save_png(source.path(), "B.PNG", 1600, 1200);

    let job = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap();

    job.run().unwrap();
    let first_a = std::fs::read(destination.path().join("a.png")).unwrap();
    let first_b = std::fs::read(destination.path().join("B.PNG")).unwrap();

    job.run().unwrap();
    let second_a = std::fs::read(destination.path().join("a.png")).unwrap();
    let second_b = std::fs::read(destination.path().join("B.PNG")).unwrap();

    assert_eq!(first_a, second_a);
    assert_eq!(first_b, second_b);
}

#[test]
fn resizes_jpeg_and_gif_entries() {
    let (source, destination) = dirs();
    save_image(source.path(), "camera.JPG", 80, 60, image::ImageFormat::Jpeg);
    save_image(source.path(), "anim.gif", 80, 60, image::ImageFormat::Gif);

    let summary = JobConfig::builder(source.path(), destination.path())
        .with_width(40)
        .with_height(30)
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(summary.resized, 2);

    for name in ["camera.JPG", "anim.gif"] {
        let resized = image::open(destination.path().join(name)).unwrap();
        assert_eq!((resized.width(), resized.height()), (40, 30), "{}", name);
    }
}

#[test]
fn directory_named_like_image_is_skipped() {
    let (source, destination) = dirs();
    std::fs::create_dir(source.path().join("album.png")).unwrap();
    save_png(source.path(), "photo.png", 80, 60);

    let mut outcomes = Vec::new();
    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run_with(|path, outcome| {
            outcomes.push((path.file_name().unwrap().to_owned(), outcome.clone()));
        })
        .unwrap();

    assert_eq!(summary.resized, 1);
    assert_eq!(summary.failed, 1);
    assert!(destination.path().join("photo.png").exists());
    assert!(!destination.path().join("album.png").exists());
    assert!(outcomes
        .iter()
        .any(|(name, outcome)| name == "album.png"
            && matches!(outcome, EntryOutcome::Failed { .. })));
}

#[cfg(unix)]
#[test]
fn dangling_symlinks_do_not_stop_the_run() {
    use std::os::unix::fs::symlink;

    let (source, destination) = dirs();
    save_png(source.path(), "photo.png", 80, 60);
    symlink("/nonexistent/target", source.path().join("notes.txt")).unwrap();
    symlink("/nonexistent/target.png", source.path().join("ghost.png")).unwrap();

    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.scanned, 3);
    assert_eq!(summary.resized, 1);
    assert_eq!(summary.not_images, 1);
    assert_eq!(summary.failed, 1);
    assert!(destination.path().join("photo.png").exists());
    assert!(!destination.path().join("ghost.png").exists());
}

#[cfg(unix)]
#[test]
fn symlink_back_to_source_is_not_followed() {
    use std::os::unix::fs::symlink;

    let (source, destination) = dirs();
    save_png(source.path(), "photo.png", 80, 60);
    symlink(source.path(), source.path().join("self")).unwrap();

    let summary = JobConfig::builder(source.path(), destination.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.resized, 1);
    assert_eq!(summary.not_images, 1);
}

#[cfg(unix)]
#[test]
fn symlinked_image_is_resized_under_link_name() {
    use std::os::unix::fs::symlink;

    let (source, destination) = dirs();
    let elsewhere = TempDir::new().unwrap();
    let target = save_png(elsewhere.path(), "real.png", 80, 60);
    symlink(&target, source.path().join("linked.png")).unwrap();

    JobConfig::builder(source.path(), destination.path())
        .with_width(40)
        .with_height(30)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let resized = image::open(destination.path().join("linked.png")).unwrap();
    assert_eq!((resized.width(), resized.height()), (40, 30));
}
