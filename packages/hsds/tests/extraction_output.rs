//! End-to-end checks for the parts of a run that don't need a model:
//! response parsing, summary rendering, and file output.

use std::fs;

use hsds::{
    render_summary, write_json, ExtractError, FlyerExtractor, FlyerImage, HsdsData, Organization,
    ScheduleFreq, ServiceStatus,
};
use openai_client::{OpenAIClient, StructuredOutput};

/// A plausible well-formed model response with every section populated.
const FULL_RESPONSE: &str = r#"{
    "organization": {
        "name": "Riverside Community Services",
        "description": "Food and housing support on the east side",
        "url": "https://riverside.example.org",
        "email": "info@riverside.example.org"
    },
    "services_at_locations": [
        {
            "service": {
                "name": "Food shelf",
                "description": "Weekly groceries for households in need",
                "status": "active",
                "eligibility": "East side residents",
                "fees": "free",
                "application_process": "Walk in, no appointment needed",
                "access_requirements": "Photo ID",
                "service_area": "Ramsey County",
                "interpretation_services": "Spanish, Hmong",
                "auxiliary_resources": ["free parking"],
                "schedules": [
                    {
                        "description": "Distribution hours",
                        "freq": "WEEKLY",
                        "byday": "TU,TH",
                        "opens_at": "14:00",
                        "closes_at": "18:00",
                        "year_round": true
                    }
                ],
                "phones": [
                    { "number": "651-555-0101", "phone_type": "voice" }
                ]
            },
            "location": {
                "name": "Riverside Hall",
                "description": "Basement entrance",
                "addresses": [
                    {
                        "address_1": "400 River Rd",
                        "city": "St Paul",
                        "state_province": "MN",
                        "postal_code": "55101",
                        "address_type": "physical"
                    }
                ],
                "latitude": 44.9442,
                "longitude": -93.0936,
                "cross_street": "River Rd & 4th Ave"
            },
            "description": "Use the ramp on the north side"
        }
    ]
}"#;

/// A minimal response: everything optional left out or null.
const SPARSE_RESPONSE: &str = r#"{
    "organization": { "name": "Bare Org", "description": "", "url": null, "email": null },
    "services_at_locations": []
}"#;

#[test]
fn well_formed_response_round_trips_to_disk_without_field_loss() {
    let data: HsdsData = serde_json::from_str(FULL_RESPONSE).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extracted_hsds_data.json");
    write_json(&data, &path).unwrap();

    // The file is byte-for-byte the serialization of the parsed response.
    let on_disk = fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, serde_json::to_string_pretty(&data).unwrap());

    // And parsing the file back loses nothing.
    let reparsed: HsdsData = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(reparsed, data);

    let service = &reparsed.services_at_locations[0].service;
    assert_eq!(service.status, ServiceStatus::Active);
    assert_eq!(service.schedules[0].freq, Some(ScheduleFreq::Weekly));
    assert_eq!(service.interpretation_services.as_deref(), Some("Spanish, Hmong"));

    let location = &reparsed.services_at_locations[0].location;
    assert_eq!(location.latitude, Some(44.9442));
    assert_eq!(location.cross_street.as_deref(), Some("River Rd & 4th Ave"));
}

#[test]
fn sparse_response_parses_and_renders() {
    let data: HsdsData = serde_json::from_str(SPARSE_RESPONSE).unwrap();
    assert_eq!(data.organization.name, "Bare Org");
    assert!(data.services_at_locations.is_empty());

    // The summary handles an empty extraction without panicking.
    let summary = render_summary(&data);
    assert!(summary.contains("SERVICES & LOCATIONS (0 found)"));
}

#[test]
fn rerun_with_same_input_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extracted_hsds_data.json");

    let first: HsdsData = serde_json::from_str(FULL_RESPONSE).unwrap();
    write_json(&first, &path).unwrap();
    let size_first = fs::metadata(&path).unwrap().len();

    let second = HsdsData {
        organization: Organization {
            name: "Second Run".into(),
            ..Default::default()
        },
        services_at_locations: vec![],
    };
    write_json(&second, &path).unwrap();

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("Second Run"));
    assert!(!on_disk.contains("Riverside"));
    // Smaller payload proves overwrite, not append.
    assert!(fs::metadata(&path).unwrap().len() < size_first);
}

#[tokio::test]
async fn failed_remote_call_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("flyer.jpg");
    fs::write(&image_path, b"fake jpeg bytes").unwrap();
    let output_path = dir.path().join("extracted_hsds_data.json");

    // Discard port: nothing listens there, so the request fails to connect.
    let client = OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:9");
    let extractor = FlyerExtractor::new(client);
    let image = FlyerImage::from_path(&image_path).unwrap();

    let result = extractor.extract(&image).await;
    assert!(matches!(result, Err(ExtractError::OpenAI(_))));

    // Same shape as the binary: the write step only runs on success.
    if let Ok(data) = result {
        write_json(&data, &output_path).unwrap();
    }
    assert!(!output_path.exists());
}

#[test]
fn hsds_schema_satisfies_strict_mode() {
    let schema = HsdsData::openai_schema();
    let rendered = serde_json::to_string(&schema).unwrap();

    assert!(!rendered.contains("$ref"));
    assert!(!rendered.contains("definitions"));
    assert!(!rendered.contains("\"format\""));
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["additionalProperties"], serde_json::json!(false));

    // Root properties all required, including the join array.
    let required = schema["required"].as_array().unwrap();
    assert!(required.iter().any(|v| v == "organization"));
    assert!(required.iter().any(|v| v == "services_at_locations"));
}
