//! PDF生成パイプラインのテスト
//!
//! 読み込み・マークアップ・レンダラ呼び出しの順序と全件成功/全件中止を検証

mod common;

use common::{image, GatedReader, RecordingReader, RecordingRenderer};
use photo_pdf::error::{ErrorKind, PhotoPdfError};
use photo_pdf::pipeline::PipelineRunner;
use photo_pdf_common::{count_image_blocks, GenerationState, Selection};
use tempfile::tempdir;

const JPEG_A: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, b'A'];
const PNG_B: &[u8] = &[0x89, b'P', b'N', b'G', b'B'];

fn selection_of(locations: &[&str]) -> Selection {
    locations.iter().map(|l| image(l)).collect()
}

/// [A, B] と " Report " → 画像ブロック2つ、A→Bの順
#[tokio::test]
async fn test_two_images_in_selection_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reader = RecordingReader::with_images(&[("A.jpg", JPEG_A), ("B.png", PNG_B)]);
    let runner = PipelineRunner::new(reader, RecordingRenderer::new(dir.path()));

    let selection = selection_of(&["A.jpg", "B.png"]);
    let doc = runner.generate(&selection, " Report ").await.expect("生成失敗");
    assert!(doc.path().exists());

    let markup = runner_markup(&runner);
    assert_eq!(count_image_blocks(&markup), 2);
    let a = markup.find("data:image/jpeg").expect("Aがない");
    let b = markup.find("data:image/png").expect("Bがない");
    assert!(a < b);
    assert!(markup.contains("<title>Report</title>"));
    assert_eq!(runner.state(), GenerationState::Idle);
}

fn runner_markup(runner: &PipelineRunner<RecordingReader, RecordingRenderer>) -> String {
    runner.renderer().last_markup().expect("マークアップが記録されていない")
}

/// N枚 → ブロックN個
#[tokio::test]
async fn test_block_count_matches_selection() {
    let dir = tempdir().expect("Failed to create temp dir");
    let locations: Vec<String> = (0..7).map(|i| format!("img{}.jpg", i)).collect();
    let data: Vec<(&str, &[u8])> = locations.iter().map(|l| (l.as_str(), JPEG_A)).collect();
    let runner = PipelineRunner::new(
        RecordingReader::with_images(&data),
        RecordingRenderer::new(dir.path()),
    );

    let refs: Vec<&str> = locations.iter().map(|s| s.as_str()).collect();
    runner.generate(&selection_of(&refs), "seven").await.unwrap();

    assert_eq!(runner.reader().call_count(), 7);
    assert_eq!(count_image_blocks(&runner_markup(&runner)), 7);
}

/// 空の選択は読み込みも描画もしない
#[tokio::test]
async fn test_empty_selection_rejected_without_io() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(RecordingReader::default(), RecordingRenderer::new(dir.path()));

    let err = runner.generate(&Selection::new(), "Report").await.unwrap_err();
    assert!(matches!(
        err,
        PhotoPdfError::Invalid(photo_pdf_common::Error::EmptySelection)
    ));
    assert_eq!(runner.reader().call_count(), 0);
    assert_eq!(runner.renderer().call_count(), 0);
}

/// 空白だけの名前は読み込み前に拒否
#[tokio::test]
async fn test_blank_name_rejected_before_read() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(
        RecordingReader::with_images(&[("A.jpg", JPEG_A)]),
        RecordingRenderer::new(dir.path()),
    );

    let err = runner.generate(&selection_of(&["A.jpg"]), "   ").await.unwrap_err();
    assert!(matches!(err, PhotoPdfError::Invalid(photo_pdf_common::Error::EmptyName)));
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(runner.reader().call_count(), 0);
    assert_eq!(runner.state(), GenerationState::Idle);
}

/// [A] でAの読み込み失敗 → 1枚目として報告、選択はそのまま
#[tokio::test]
async fn test_read_failure_reports_position() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(
        RecordingReader::default().missing("A.jpg"),
        RecordingRenderer::new(dir.path()),
    );

    let selection = selection_of(&["A.jpg"]);
    let before = selection.clone();
    let err = runner.generate(&selection, "Report").await.unwrap_err();

    match &err {
        PhotoPdfError::ReadFailure { position, file_name, .. } => {
            assert_eq!(*position, 1);
            assert_eq!(file_name, "A.jpg");
        }
        other => panic!("ReadFailureではない: {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert!(err.to_string().contains("1枚目"));
    assert_eq!(selection, before);
    assert_eq!(runner.renderer().call_count(), 0);
    assert_eq!(runner.state(), GenerationState::Idle);
}

/// 途中の1枚が失敗したら描画しない（部分的な送信なし）
#[tokio::test]
async fn test_middle_failure_never_renders() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reader = RecordingReader::with_images(&[("A.jpg", JPEG_A), ("C.jpg", JPEG_A)]).missing("B.jpg");
    let runner = PipelineRunner::new(reader, RecordingRenderer::new(dir.path()));

    let err = runner
        .generate(&selection_of(&["A.jpg", "B.jpg", "C.jpg"]), "Report")
        .await
        .unwrap_err();

    assert!(matches!(err, PhotoPdfError::ReadFailure { position: 2, .. }));
    // Cは読まない
    assert_eq!(runner.reader().call_count(), 2);
    assert_eq!(runner.renderer().call_count(), 0);
}

/// レンダラのエラーメッセージはそのまま伝える
#[tokio::test]
async fn test_render_failure_propagates_message() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(
        RecordingReader::with_images(&[("A.jpg", JPEG_A)]),
        RecordingRenderer::failing(dir.path(), "engine exploded"),
    );

    let err = runner.generate(&selection_of(&["A.jpg"]), "Report").await.unwrap_err();
    assert!(matches!(&err, PhotoPdfError::Render(msg) if msg == "engine exploded"));
    assert_eq!(err.kind(), ErrorKind::RenderOrSaveFailure);
    assert_eq!(runner.state(), GenerationState::Idle);
}

/// 生成中は2回目の呼び出しを拒否する（待たせない）
#[tokio::test]
async fn test_overlapping_generate_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(GatedReader::default(), RecordingRenderer::new(dir.path()));
    let selection = selection_of(&["A.jpg"]);

    let first = runner.generate(&selection, "first");
    let second = async {
        runner.reader().started.notified().await;
        assert_eq!(runner.state(), GenerationState::Generating);
        let result = runner.generate(&selection, "second").await;
        runner.reader().release.notify_one();
        result
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.is_ok());
    assert!(matches!(second, Err(PhotoPdfError::AlreadyGenerating)));
    assert_eq!(runner.renderer().call_count(), 1);
    assert_eq!(runner.state(), GenerationState::Idle);
}

/// 手動で生成中にした場合も拒否
#[tokio::test]
async fn test_busy_gate_rejects() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(
        RecordingReader::with_images(&[("A.jpg", JPEG_A)]),
        RecordingRenderer::new(dir.path()),
    );

    let ticket = runner.gate().try_begin().unwrap();
    let err = runner.generate(&selection_of(&["A.jpg"]), "Report").await.unwrap_err();
    assert!(matches!(err, PhotoPdfError::AlreadyGenerating));
    assert_eq!(runner.reader().call_count(), 0);

    drop(ticket);
    assert!(runner.generate(&selection_of(&["A.jpg"]), "Report").await.is_ok());
}

/// 名前の最大長
#[tokio::test]
async fn test_name_too_long() {
    let dir = tempdir().expect("Failed to create temp dir");
    let runner = PipelineRunner::new(
        RecordingReader::with_images(&[("A.jpg", JPEG_A)]),
        RecordingRenderer::new(dir.path()),
    )
    .with_max_name_chars(5);

    let err = runner.generate(&selection_of(&["A.jpg"]), "toolong").await.unwrap_err();
    assert!(matches!(
        err,
        PhotoPdfError::Invalid(photo_pdf_common::Error::NameTooLong { len: 7, max: 5 })
    ));
}
