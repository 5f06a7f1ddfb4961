use seolift::models::Document;
use seolift::report::SeoReport;
use std::fs;

fn document(json: serde_json::Value) -> Document {
    serde_json::from_value(json).expect("test document should deserialize")
}

#[test]
fn test_title_scenario_counts() {
    // Three articles with title lengths 0, 40 and 70
    let documents = vec![
        document(serde_json::json!({ "url": "no-title.html" })),
        document(serde_json::json!({ "url": "short.html", "title": "a".repeat(40) })),
        document(serde_json::json!({ "url": "good.html", "title": "a".repeat(70) })),
    ];

    let seo_report = SeoReport::new("https://example.com");
    let analyses: Vec<_> = documents
        .iter()
        .map(|document| seo_report.launch_analysis(document))
        .collect();
    let reports = SeoReport::build_reports(&analyses);

    let title_reports: Vec<_> = reports.iter().map(|report| &report.reports[0]).collect();

    let declared = title_reports
        .iter()
        .filter(|report| {
            report
                .good
                .iter()
                .any(|message| message.contains("declared a title"))
        })
        .count();
    assert_eq!(declared, 2);

    let too_short = title_reports
        .iter()
        .filter(|report| {
            report
                .to_improve
                .iter()
                .any(|message| message.contains("too short"))
        })
        .count();
    assert_eq!(too_short, 1);

    let good_length = title_reports
        .iter()
        .filter(|report| {
            report
                .good
                .iter()
                .any(|message| message.contains("good length"))
        })
        .count();
    assert_eq!(good_length, 1);

    let missing = title_reports
        .iter()
        .filter(|report| !report.problems.is_empty())
        .count();
    assert_eq!(missing, 1);
}

#[test]
fn test_every_document_gets_four_micro_reports() {
    let documents = vec![
        document(serde_json::json!({ "url": "bare.html" })),
        document(serde_json::json!({
            "url": "full.html",
            "title": "A title",
            "description": "A description",
            "content": "<h1>Heading</h1><a href=\"https://example.com/\">Home</a>",
        })),
    ];

    let seo_report = SeoReport::new("https://example.com");
    for doc in &documents {
        let analysis = seo_report.launch_analysis(doc);
        let micro_reports = SeoReport::launch_report(&analysis);

        assert_eq!(micro_reports.len(), 4);
        assert_eq!(micro_reports[0].title, "Page title analysis");
        assert_eq!(micro_reports[1].title, "Page description analysis");
        assert_eq!(micro_reports[2].title, "Content title analysis");
        assert_eq!(micro_reports[3].title, "Internal link analysis");
    }
}

#[test]
fn test_missing_data_reports_problems_not_errors() {
    let doc = document(serde_json::json!({ "url": "bare.html" }));

    let seo_report = SeoReport::new("https://example.com");
    let analysis = seo_report.launch_analysis(&doc);
    let micro_reports = SeoReport::launch_report(&analysis);

    for micro_report in &micro_reports {
        assert_eq!(micro_report.problems.len(), 1, "{}", micro_report.title);
        assert!(micro_report.good.is_empty());
        assert!(micro_report.to_improve.is_empty());
    }
}

#[test]
fn test_generate_sorts_and_overwrites_report_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let report_file = temp_dir.path().join("seo_report.html");

    let documents = vec![
        document(serde_json::json!({ "url": "undated.html" })),
        document(serde_json::json!({ "url": "old.html", "date": "2019-01-01" })),
        document(serde_json::json!({ "url": "recent.html", "date": "2020-01-01" })),
    ];

    let seo_report = SeoReport::new("https://example.com");
    let analyses: Vec<_> = documents
        .iter()
        .map(|document| seo_report.launch_analysis(document))
        .collect();

    seo_report
        .generate("My site", &analyses, &report_file)
        .unwrap();

    let html = fs::read_to_string(&report_file).unwrap();
    assert!(html.contains("<h1>SEO report - My site</h1>"));

    let recent = html.find("recent.html").unwrap();
    let old = html.find("old.html").unwrap();
    let undated = html.find("undated.html").unwrap();
    assert!(recent < old && old < undated);

    // Second run fully rewrites the file
    seo_report.generate("My site", &[], &report_file).unwrap();
    let html = fs::read_to_string(&report_file).unwrap();
    assert!(!html.contains("recent.html"));
}
