//! 出力配置のテスト
//!
//! DirectSave / ShareOnly それぞれのファイル名・場所・共有呼び出し回数を検証

mod common;

use async_trait::async_trait;
use common::RecordingShare;
use photo_pdf::error::{ErrorKind, PhotoPdfError};
use photo_pdf::output::{
    DirectSave, FsPublicStorage, PlaceOutcome, PublicStorageWriter, SaveStrategy, ShareOnly,
    PDF_CONTENT_TYPE,
};
use photo_pdf::render::RenderedDocument;
use photo_pdf_common::DocumentName;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn rendered(dir: &Path) -> RenderedDocument {
    let path = dir.join("render-tmp.pdf");
    std::fs::write(&path, b"%PDF-1.7\n%test\n").expect("一時PDF作成失敗");
    RenderedDocument::new(path, 1)
}

/// DirectSave: 公開領域に `trim(name).pdf` で書き込む
#[tokio::test]
async fn test_direct_save_writes_trimmed_name() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let downloads = tmp.path().join("Downloads");
    let doc = rendered(tmp.path());
    let temp_path = doc.path().to_path_buf();

    let strategy = DirectSave::new(FsPublicStorage::new(&downloads));
    let name = DocumentName::parse(" Report ").unwrap();
    let outcome = strategy.place(doc, &name).await.expect("保存失敗");

    let expected = downloads.join("Report.pdf");
    assert_eq!(outcome, PlaceOutcome::Saved { location: expected.clone() });
    assert_eq!(std::fs::read(&expected).unwrap(), b"%PDF-1.7\n%test\n");
    // 一時ファイルは残さない
    assert!(!temp_path.exists());
}

/// DirectSave: 同名ファイルは上書き
#[tokio::test]
async fn test_direct_save_overwrites() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let downloads = tmp.path().join("Downloads");
    std::fs::create_dir_all(&downloads).unwrap();
    std::fs::write(downloads.join("Report.pdf"), b"old").unwrap();

    let strategy = DirectSave::new(FsPublicStorage::new(&downloads));
    let name = DocumentName::parse("Report").unwrap();
    strategy.place(rendered(tmp.path()), &name).await.unwrap();

    assert_eq!(std::fs::read(downloads.join("Report.pdf")).unwrap(), b"%PDF-1.7\n%test\n");
}

struct FailingStorage;

#[async_trait]
impl PublicStorageWriter for FailingStorage {
    async fn write_to_public_area(&self, _file: &Path, _file_name: &str) -> std::io::Result<PathBuf> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"))
    }
}

/// 書き込み失敗は保存エラー、一時ファイルは削除
#[tokio::test]
async fn test_direct_save_failure_is_save_error() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let doc = rendered(tmp.path());
    let temp_path = doc.path().to_path_buf();

    let strategy = DirectSave::new(FailingStorage);
    let err = strategy
        .place(doc, &DocumentName::parse("Report").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(&err, PhotoPdfError::Save(msg) if msg.contains("read-only volume")));
    assert_eq!(err.kind(), ErrorKind::RenderOrSaveFailure);
    assert!(!temp_path.exists());
}

/// 最終名に置けないときは `.part` を残さない
#[tokio::test]
async fn test_direct_save_failed_write_leaves_nothing() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let downloads = tmp.path().join("Downloads");
    // 同名のディレクトリがあるとrenameできない
    let blocker = downloads.join("Report.pdf");
    std::fs::create_dir_all(&blocker).unwrap();
    std::fs::write(blocker.join("keep.txt"), b"x").unwrap();

    let strategy = DirectSave::new(FsPublicStorage::new(&downloads));
    let err = strategy
        .place(rendered(tmp.path()), &DocumentName::parse("Report").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PhotoPdfError::Save(_)));
    assert!(blocker.is_dir());
    assert!(!downloads.join(".Report.pdf.part").exists());
    let leftovers: Vec<_> = std::fs::read_dir(&downloads).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

/// コピーに失敗しても既存の同名ファイルは元のまま
#[tokio::test]
async fn test_direct_save_failed_copy_keeps_existing_file() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let downloads = tmp.path().join("Downloads");
    std::fs::create_dir_all(&downloads).unwrap();
    std::fs::write(downloads.join("Report.pdf"), b"old").unwrap();

    let storage = FsPublicStorage::new(&downloads);
    let result = storage
        .write_to_public_area(&tmp.path().join("missing.pdf"), "Report.pdf")
        .await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(downloads.join("Report.pdf")).unwrap(), b"old");
    assert!(!downloads.join(".Report.pdf.part").exists());
}

/// ShareOnly: 専用領域に移してから共有を1回だけ呼ぶ
#[tokio::test]
async fn test_share_only_relocates_and_shares_once() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let private = tmp.path().join("private");
    let doc = rendered(tmp.path());
    let temp_path = doc.path().to_path_buf();

    let share = RecordingShare::default();
    let strategy = ShareOnly::new(&private, share.clone());
    let outcome = strategy
        .place(doc, &DocumentName::parse(" Report ").unwrap())
        .await
        .expect("共有失敗");

    let expected = private.join("Report.pdf");
    assert_eq!(outcome, PlaceOutcome::Shared { location: expected.clone() });
    assert!(expected.exists());
    assert!(!temp_path.exists());

    let calls = share.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, expected);
    assert_eq!(calls[0].1, PDF_CONTENT_TYPE);
}

/// ShareOnly: 移動に失敗したら共有しない
#[tokio::test]
async fn test_share_only_missing_file_does_not_share() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let doc = RenderedDocument::new(tmp.path().join("vanished.pdf"), 1);

    let share = RecordingShare::default();
    let strategy = ShareOnly::new(tmp.path().join("private"), share.clone());
    let err = strategy
        .place(doc, &DocumentName::parse("Report").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PhotoPdfError::Save(_)));
    assert!(share.calls.lock().unwrap().is_empty());
}

/// Box<dyn SaveStrategy> 経由でも同じ動作
#[tokio::test]
async fn test_boxed_strategy() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let downloads = tmp.path().join("Downloads");
    let strategy: Box<dyn SaveStrategy> = Box::new(DirectSave::new(FsPublicStorage::new(&downloads)));

    let outcome = strategy
        .place(rendered(tmp.path()), &DocumentName::parse("工事写真").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome.location(), downloads.join("工事写真.pdf"));
}
