//! Integration tests for the resume screener

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use resume_screener::input::text_extractor::{DocumentTextExtractor, PageOutcome, PdfExtractor};
use resume_screener::input::InputManager;
use resume_screener::processing::screening::{CandidateDocument, ScreeningOrchestrator};
use std::path::Path;

/// Build an in-memory PDF with one Helvetica text line per page
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_pdf_pages_are_extracted_in_order() {
    let bytes = build_pdf(&["Rust engineer", "Kubernetes operator"]);

    let outcomes = PdfExtractor.extract_pages(&bytes);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| matches!(o, PageOutcome::Extracted(_))));

    let text = PdfExtractor.extract(&bytes);
    let rust = text.find("Rust engineer").expect("first page text");
    let kubernetes = text.find("Kubernetes operator").expect("second page text");
    assert!(rust < kubernetes);
    assert_eq!(text, text.trim());
}

/// Point one page's Contents at `contents`, which lopdf cannot read back
fn break_page(bytes: &[u8], page_number: u32, contents: Object) -> Vec<u8> {
    let mut doc = Document::load_mem(bytes).unwrap();
    let page_id = doc.get_pages()[&page_number];
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Contents", contents);

    let mut broken = Vec::new();
    doc.save_to(&mut broken).unwrap();
    broken
}

#[test]
fn test_pdf_page_with_missing_contents_is_skipped() {
    let bytes = build_pdf(&["Rust engineer", "Go developer", "Kubernetes operator"]);
    let bytes = break_page(&bytes, 2, Object::Reference((9999, 0)));

    let outcomes = PdfExtractor.extract_pages(&bytes);
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], PageOutcome::Extracted(_)));
    assert_eq!(outcomes[1], PageOutcome::Skipped);
    assert!(matches!(outcomes[2], PageOutcome::Extracted(_)));

    assert_eq!(PdfExtractor.extract(&bytes), "Rust engineer\nKubernetes operator");
}

#[test]
fn test_pdf_page_with_undecodable_stream_is_skipped() {
    let bytes = build_pdf(&["Rust engineer", "Go developer", "Kubernetes operator"]);
    let mut doc = Document::load_mem(&bytes).unwrap();
    let undecodable_id = doc.add_object(Stream::new(
        dictionary! { "Filter" => "JBIG2Decode" },
        b"BT /F1 12 Tf (Go developer) Tj ET".to_vec(),
    ));
    let mut with_stream = Vec::new();
    doc.save_to(&mut with_stream).unwrap();
    let bytes = break_page(&with_stream, 2, Object::Reference(undecodable_id));

    let outcomes = PdfExtractor.extract_pages(&bytes);
    assert_eq!(outcomes[1], PageOutcome::Skipped);
    assert_eq!(PdfExtractor.extract(&bytes), "Rust engineer\nKubernetes operator");
}

#[test]
fn test_pdf_resume_is_screened() {
    let reference = "Senior Python Engineer with AWS experience";
    let pdf = CandidateDocument::new("python.pdf", build_pdf(&[reference]));
    let broken = CandidateDocument::new("broken.pdf", b"%PDF-1.5 truncated".to_vec());

    let orchestrator = ScreeningOrchestrator::default();
    let results = orchestrator.run(reference, &[broken, pdf]);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].file_name, "python.pdf");
    assert!(results[0].score > 99.0, "score was {}", results[0].score);
    assert!(results[0].gaps.is_empty());
    assert_eq!(results[1].file_name, "broken.pdf");
    assert_eq!(results[1].score, 0.0);
}

#[tokio::test]
async fn test_screening_fixture_files() {
    let manager = InputManager::new();
    let job = manager
        .read_job_description(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let weak = manager
        .load_candidate(Path::new("tests/fixtures/weak_resume.md"))
        .await
        .unwrap();
    let strong = manager
        .load_candidate(Path::new("tests/fixtures/strong_resume.txt"))
        .await
        .unwrap();
    assert_eq!(strong.name(), "strong_resume.txt");

    let orchestrator = ScreeningOrchestrator::new(5);
    let candidates = vec![weak, strong];

    let sequential = orchestrator.run(&job, &candidates);
    assert_eq!(sequential[0].file_name, "strong_resume.txt");
    assert!(sequential[0].score > sequential[1].score);
    assert!(sequential[0].strengths.contains(&"backend".to_string()));
    assert!(sequential[1].gaps.contains(&"senior".to_string()));
    assert!(sequential.iter().all(|r| r.strengths.len() <= 5 && r.gaps.len() <= 5));

    let concurrent = orchestrator.run_concurrent(&job, candidates, 4).await.unwrap();
    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let manager = InputManager::new();
    let job = manager
        .read_job_description(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();
    let candidates = vec![
        manager.load_candidate(Path::new("tests/fixtures/strong_resume.txt")).await.unwrap(),
        manager.load_candidate(Path::new("tests/fixtures/weak_resume.md")).await.unwrap(),
    ];

    let orchestrator = ScreeningOrchestrator::default();
    assert_eq!(orchestrator.run(&job, &candidates), orchestrator.run(&job, &candidates));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::new();
    let result = manager
        .load_candidate(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let result = manager
        .load_candidate(Path::new("tests/fixtures/nonexistent.pdf"))
        .await;
    assert!(result.is_err());
}
