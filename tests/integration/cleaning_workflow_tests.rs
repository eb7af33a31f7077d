/*!
 * End-to-end tests for cleaning files and folders on disk
 */

use std::fs;
use anyhow::Result;
use citeclean::app_config::Config;
use citeclean::app_controller::{Controller, FileOutcome};
use citeclean::citation::{self, CitationStats};
use crate::common;

/// Lay out a folder with two exports, a nested one and some noise
fn create_export_folder(root: &std::path::PathBuf) -> Result<()> {
    common::create_test_html(root, "first.html")?;
    let export = fs::read_to_string(common::test_resource_path("chat_export.html"))?;
    common::create_test_file(root, "nested/second.html", &export)?;
    common::create_test_file(root, "notes.txt", "[cite: 1]")?;
    Ok(())
}

#[test]
fn test_clean_folder_withNestedExports_shouldCleanEachNextToSource() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    create_export_folder(&root)?;
    let controller = Controller::new_for_test()?;

    let summary = controller.clean_folder(&root, false)?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.stats, CitationStats::new(6, 3));

    let first = fs::read_to_string(root.join("first_cleaned.html"))?;
    let second = fs::read_to_string(root.join("nested").join("second_cleaned.html"))?;
    assert_eq!(citation::count(&first).total, 0);
    assert_eq!(citation::count(&second).total, 0);
    assert!(second.contains("[cite: see appendix]"));
    assert!(!root.join("notes_cleaned.html").exists());

    Ok(())
}

/// Test that a second run only skips, and forcing reprocesses without nesting suffixes
#[test]
fn test_clean_folder_withPreviousRun_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    create_export_folder(&root)?;
    let controller = Controller::new_for_test()?;
    controller.clean_folder(&root, false)?;

    let rerun = controller.clean_folder(&root, false)?;
    assert_eq!((rerun.processed, rerun.skipped), (0, 2));
    assert!(rerun.stats.is_empty());

    let forced = controller.clean_folder(&root, true)?;
    assert_eq!((forced.processed, forced.skipped), (2, 0));
    assert!(!root.join("first_cleaned_cleaned.html").exists());

    Ok(())
}

#[test]
fn test_clean_folder_withConfiguredOutputDir_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().join("in");
    let out = temp_dir.path().join("out");
    create_export_folder(&root)?;

    let mut config = Config::default();
    config.output.output_dir = Some(out.clone());
    let controller = Controller::with_config(config)?;

    let summary = controller.clean_folder(&root, false)?;

    assert_eq!(summary.processed, 2);
    assert!(out.join("first_cleaned.html").exists());
    assert!(out.join("nested").join("second_cleaned.html").exists());
    assert!(!root.join("first_cleaned.html").exists());

    Ok(())
}

/// Equal names in different folders must not collide in the output directory
#[test]
fn test_clean_folder_withSameNameInTwoFolders_shouldKeepBothOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().join("in");
    let out = temp_dir.path().join("out");
    common::create_test_file(&root, "monday/chat.html", "<p>Mon [cite: 1]</p>")?;
    common::create_test_file(&root, "tuesday/chat.html", "<p>Tue [cite_start]</p>")?;

    let mut config = Config::default();
    config.output.output_dir = Some(out.clone());
    let controller = Controller::with_config(config)?;

    let summary = controller.clean_folder(&root, false)?;

    assert_eq!((summary.processed, summary.skipped), (2, 0));
    assert_eq!(fs::read_to_string(out.join("monday").join("chat_cleaned.html"))?, "<p>Mon </p>");
    assert_eq!(fs::read_to_string(out.join("tuesday").join("chat_cleaned.html"))?, "<p>Tue </p>");

    Ok(())
}

#[test]
fn test_clean_folder_withNoHtmlFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "readme.txt", "nothing here")?;
    let controller = Controller::new_for_test()?;

    let err = controller.clean_folder(temp_dir.path(), false).unwrap_err();
    assert!(err.to_string().contains("No HTML files found"));

    let missing = controller.clean_folder(&temp_dir.path().join("missing"), false);
    assert!(missing.is_err());

    Ok(())
}

/// Test that cleaning the cleaned output changes nothing
#[test]
fn test_clean_file_withCleanedOutputAsInput_shouldBeStable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let export = fs::read_to_string(common::test_resource_path("chat_export.html"))?;
    let input = common::create_test_file(&root, "chat.html", &export)?;
    let controller = Controller::new_for_test()?;

    let FileOutcome::Cleaned { output_path, stats } = controller.clean_file(&input, &root, false)? else {
        panic!("expected a cleaned file");
    };
    assert_eq!(stats.as_tuple(), (4, 2, 6));

    let again = controller.read_and_clean(&output_path)?;
    assert!(!again.is_changed());
    assert!(again.stats.is_empty());

    Ok(())
}
