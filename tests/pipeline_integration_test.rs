//! End-to-end export tests against real files
//!
//! Every test writes a ruleset, a vocabulary export, a configuration file and
//! a descriptor into a temporary directory and runs the coordinator built from
//! that configuration.

use lux_export::adapters::descriptor::{DescriptorStore, JsonDescriptorStore};
use lux_export::config::load_config;
use lux_export::core::export::{ExportCoordinator, ExportRequest, ExportStatus, ExportSummary};
use lux_export::core::variables::ProcessInfo;
use lux_export::domain::{Document, Owner, ProcessTitle, Ruleset};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RULESET: &str = r#"{
    "metadata_types": [
        "Published", "TitleDocMain", "PlaceOfBirth", "Occupation",
        "_occupation_eng", "_occupation_ger", "CatalogIDDigital", "PhysicalCount",
        "SourceID", "SourceTitle", "Subject", "File", "LocationName",
        "Type", "RelationEntityType", "RelationProcessID",
        "physPageNumber", "logicalPageNumber"
    ],
    "group_types": {
        "Source": {}, "Bibliography": {}, "Media": {},
        "Relationship": {}, "LocationGroup": {}
    },
    "struct_types": {
        "Person": {}, "Event": {}, "BoundBook": {}, "page": {}
    }
}"#;

const VOCABULARIES: &str = r#"{
    "vocabularies": [
        {"id": 12, "title": "Sources", "records": [
            {"id": 7, "vocabulary_id": 12, "title": "Thieme-Becker", "fields": [
                {"label": "Title", "value": "Allgemeines Lexikon", "definition": {"label": "Title"}}
            ]}
        ]},
        {"id": 3, "title": "Location", "records": [
            {"id": 55, "vocabulary_id": 3, "title": "Berlin", "fields": [
                {"label": "Location", "value": "Berlin", "definition": {"label": "Location"}},
                {"label": "Authority Value", "value": "2950159", "definition": {"label": "Authority Value"}}
            ]}
        ]},
        {"id": 4, "title": "Occupations", "records": [
            {"id": 9, "vocabulary_id": 4, "title": "Painter", "fields": [
                {"label": "Occupation", "language": "eng", "value": "Painter",
                 "definition": {"label": "Occupation", "language": "eng"}},
                {"label": "Beruf", "language": "ger", "value": "Maler",
                 "definition": {"label": "Beruf", "language": "ger"}}
            ]}
        ]}
    ]
}"#;

const PERSON: &str = r#"{
    "logical": {
        "id": "LOG_0000",
        "type": "Person",
        "metadata": [
            {"type": "Published", "value": "Y"},
            {"type": "TitleDocMain", "value": "Ackermann, Anna"},
            {"type": "PlaceOfBirth", "value": "Berlin",
             "authority": {"id": "Location", "uri": "https://vocab.example.org/vocabulary/",
                           "value": "https://vocab.example.org/vocabulary/3/55"}},
            {"type": "Occupation", "value": "Painter",
             "authority": {"id": "Occupations", "uri": "https://vocab.example.org/vocabulary/",
                           "value": "https://vocab.example.org/vocabulary/4/Painter"}}
        ],
        "groups": [
            {"type": "Bibliography", "groups": [
                {"type": "Source", "metadata": [
                    {"type": "SourceID", "value": "7"},
                    {"type": "SourceTitle", "value": "null"}
                ]}
            ]},
            {"type": "Bibliography", "metadata": [
                {"type": "Published", "value": "N"}
            ], "groups": [
                {"type": "Source", "metadata": [{"type": "SourceID", "value": "8"}]}
            ]},
            {"type": "Media", "metadata": [
                {"type": "Subject", "value": "Portrait"},
                {"type": "File", "value": "images/img_01.jpg"}
            ]}
        ]
    },
    "physical": {
        "id": "PHYS_0000",
        "type": "BoundBook",
        "children": [
            {"id": "PHYS_0001", "type": "page", "files": ["FILE_0001"],
             "metadata": [{"type": "physPageNumber", "value": "1"}]},
            {"id": "PHYS_0002", "type": "page", "files": ["FILE_0002"],
             "metadata": [{"type": "physPageNumber", "value": "2"}]},
            {"id": "PHYS_0003", "type": "page", "files": ["FILE_0003"],
             "metadata": [{"type": "physPageNumber", "value": "3"}]},
            {"id": "PHYS_0004", "type": "page", "files": ["FILE_0004"],
             "metadata": [{"type": "physPageNumber", "value": "4"}]}
        ]
    },
    "files": [
        {"id": "FILE_0001", "mimetype": "image/jpeg", "location": "file:///data/42/images/img_01.jpg"},
        {"id": "FILE_0002", "mimetype": "image/tiff", "location": "file:///data/42/images/img_01.tif"},
        {"id": "FILE_0003", "mimetype": "image/jpeg", "location": "file:///data/42/images/img_02.jpg"},
        {"id": "FILE_0004", "mimetype": "image/jpeg", "location": "file:///data/42/images/img_03.jpg"}
    ],
    "references": [
        {"source": "LOG_0000", "target": "PHYS_0001", "type": "logical_physical"},
        {"source": "LOG_0000", "target": "PHYS_0002", "type": "logical_physical"},
        {"source": "LOG_0000", "target": "PHYS_0003", "type": "logical_physical"},
        {"source": "LOG_0000", "target": "PHYS_0004", "type": "logical_physical"}
    ]
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ruleset.json"), RULESET).unwrap();
        fs::write(dir.path().join("vocabularies.json"), VOCABULARIES).unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn image(&self, name: &str) {
        fs::write(self.path("images").join(name), b"image").unwrap();
    }

    fn descriptor(&self, contents: &str) -> PathBuf {
        let path = self.path("meta.json");
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes the configuration with `export_extra` appended to `[export]`
    fn coordinator(&self, export_extra: &str) -> ExportCoordinator {
        let config = format!(
            r#"
[application]
log_level = "debug"

[export]
vocabulary_base_url = "https://lux.example.org/vocabulary/"
destination = "{out}"
metadata_folder = "{metadata}"
{export_extra}

[ruleset]
path = "{ruleset}"

[vocabulary_service]
path = "{vocabularies}"

[[metadata]]
metadata_type = "CatalogIDDigital"
rule = "'lux_'+{{process.id}}"
number_format = "00000"

[[metadata]]
metadata_type = "PhysicalCount"
rule = "{{pages}}"

[[vocabulary]]
metadata_group_type = "Source"
vocabulary_id = 12
record_identifier_metadata = "SourceID"

[[vocabulary.enrich]]
vocabulary_field = "Title"
metadata_type = "SourceTitle"

[[file_groups]]
name = "PRESENTATION"
path = "https://iiif.example.org/{{process.title}}/"
mimetype = "image/jpeg"
suffix = "jpg"

[[file_groups]]
name = "FULLTEXT"
path = "https://ocr.example.org/{{process.title}}/"
mimetype = "text/xml"
suffix = "xml"
folder = "{ocr}"

[logging]
local_enabled = false
"#,
            out = self.path("out").display(),
            metadata = self.path("metadata").display(),
            ruleset = self.path("ruleset.json").display(),
            vocabularies = self.path("vocabularies.json").display(),
            ocr = self.path("ocr").display(),
        );
        let config_path = self.path("lux-export.toml");
        fs::write(&config_path, config).unwrap();

        ExportCoordinator::from_config(load_config(&config_path).unwrap()).unwrap()
    }

    fn request(&self, descriptor: PathBuf) -> ExportRequest {
        let process = ProcessInfo::new(ProcessTitle::new("lux_artist_0042").unwrap(), 42);
        ExportRequest::new(descriptor, self.path("images"), process)
    }

    fn exported(&self, summary: &ExportSummary) -> Document {
        let ruleset = Ruleset::from_file(self.path("ruleset.json")).unwrap();
        let path = summary.output_path.as_ref().expect("descriptor written");
        JsonDescriptorStore::new()
            .read(path, std::sync::Arc::new(ruleset))
            .unwrap()
    }
}

fn root_values(doc: &Document, metadata_type: &str) -> Vec<String> {
    let root = Owner::Node(doc.logical_root().unwrap());
    doc.metadata_by_type(root, metadata_type)
        .into_iter()
        .map(|id| doc.metadata(id).value_str().to_string())
        .collect()
}

#[test]
fn test_full_export() {
    let fixture = Fixture::new();
    fixture.image("img_01.jpg");
    fixture.image("img_02.jpg");
    let descriptor = fixture.descriptor(PERSON);

    let summary = fixture.coordinator("").run(&fixture.request(descriptor));

    assert_eq!(summary.status, ExportStatus::Exported, "{:?}", summary.errors);
    assert!(summary.errors.is_empty(), "{:?}", summary.errors);
    assert_eq!(summary.groups_pruned, 1);
    assert_eq!(summary.source_groups, 1);
    assert_eq!(summary.bibliography_groups, 1);
    // img_01.tif repeats img_01, img_03.jpg is not on disk
    assert_eq!(summary.pages_removed, 2);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.representative_marked, 1);
    assert_eq!(summary.metadata_resolved, 2);
    assert_eq!(summary.metadata_derived, 2);
    assert_eq!(summary.group_fields_filled, 1);
    assert_eq!(summary.metadata_generated, 2);
    assert_eq!(
        summary.output_path,
        Some(fixture.path("out").join("lux_artist_0042.json"))
    );

    let plan = summary.plan.as_ref().unwrap();
    assert_eq!(plan.groups.len(), 1, "FULLTEXT folder does not exist");
    assert_eq!(
        plan.main_group().unwrap().path_to_files,
        "https://iiif.example.org/lux_artist_0042/"
    );

    let doc = fixture.exported(&summary);
    let root = Owner::Node(doc.logical_root().unwrap());

    assert_eq!(doc.pages().len(), 2);
    let names: Vec<_> = doc
        .pages()
        .into_iter()
        .filter_map(|page| doc.page_image_name(page))
        .collect();
    assert_eq!(names, vec!["img_01.jpg", "img_02.jpg"]);
    assert_eq!(doc.groups_by_type(root, "Bibliography").len(), 1);

    let place = doc.metadata(doc.metadata_by_type(root, "PlaceOfBirth")[0]);
    assert_eq!(
        place.authority.as_ref().unwrap().value,
        "http://www.geonames.org/2950159"
    );
    let occupation = doc.metadata(doc.metadata_by_type(root, "Occupation")[0]);
    assert_eq!(
        occupation.authority.as_ref().unwrap().value,
        "https://lux.example.org/vocabulary/4/9"
    );
    assert_eq!(root_values(&doc, "_occupation_eng"), vec!["Painter"]);
    assert_eq!(root_values(&doc, "_occupation_ger"), vec!["Maler"]);

    let source = doc.groups_by_type_recursive(root, "Source")[0];
    assert_eq!(
        doc.first_value(Owner::Group(source), "SourceTitle"),
        Some("Allgemeines Lexikon")
    );

    assert_eq!(root_values(&doc, "CatalogIDDigital"), vec!["lux_00042"]);
    assert_eq!(root_values(&doc, "PhysicalCount"), vec!["2"]);

    let representative: Vec<_> = doc
        .file_ids()
        .iter()
        .filter(|id| doc.file(**id).representative)
        .map(|id| doc.file(*id).location.clone())
        .collect();
    assert_eq!(representative, vec!["file:///data/42/images/img_01.jpg"]);
}

#[test]
fn test_unpublished_record_is_not_exported() {
    let fixture = Fixture::new();
    let descriptor = fixture.descriptor(&PERSON.replace(
        r#"{"type": "Published", "value": "Y"}"#,
        r#"{"type": "Published", "value": "N"}"#,
    ));

    let summary = fixture.coordinator("").run(&fixture.request(descriptor));

    assert_eq!(summary.status, ExportStatus::NotApplicable);
    assert!(summary.is_successful());
    assert!(!fixture.path("out").exists());
}

#[test]
fn test_unpublished_record_exported_when_configured() {
    let fixture = Fixture::new();
    fixture.image("img_01.jpg");
    let descriptor = fixture.descriptor(&PERSON.replace(
        r#"{"type": "Published", "value": "Y"}"#,
        r#"{"type": "Published", "value": "N"}"#,
    ));

    let summary = fixture
        .coordinator("export_unpublished_records = true")
        .run(&fixture.request(descriptor));

    assert_eq!(summary.status, ExportStatus::Exported);
    assert!(summary.output_path.is_some());
}

#[test]
fn test_missing_logical_structure_fails() {
    let fixture = Fixture::new();
    let descriptor = fixture.descriptor(r#"{"files": []}"#);

    let summary = fixture.coordinator("").run(&fixture.request(descriptor));

    assert_eq!(summary.status, ExportStatus::Failed);
    assert_eq!(summary.problems(), vec!["No logical structure defined".to_string()]);
}

#[test]
fn test_pagination_rebuild_writes_back() {
    let fixture = Fixture::new();
    fixture.image("scan_b.tif");
    fixture.image("scan_a.tif");
    let descriptor = fixture.descriptor(PERSON);

    let summary = fixture
        .coordinator("cleanup_pagination = true")
        .run(&fixture.request(descriptor.clone()));

    assert_eq!(summary.status, ExportStatus::Exported, "{:?}", summary.errors);
    assert_eq!(summary.pages_rebuilt, Some(2));
    assert!(summary.written_back);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.pages_removed, 0);

    let ruleset = std::sync::Arc::new(Ruleset::from_file(fixture.path("ruleset.json")).unwrap());
    let source = JsonDescriptorStore::new().read(&descriptor, ruleset).unwrap();
    let names: Vec<_> = source
        .pages()
        .into_iter()
        .filter_map(|page| source.page_image_name(page))
        .collect();
    assert_eq!(names, vec!["scan_a.tif", "scan_b.tif"]);
}

#[test]
fn test_pagination_write_back_keeps_unpublished_groups() {
    let fixture = Fixture::new();
    fixture.image("scan_a.tif");
    let descriptor = fixture.descriptor(PERSON);

    let summary = fixture
        .coordinator("cleanup_pagination = true")
        .run(&fixture.request(descriptor.clone()));

    assert!(summary.written_back);
    assert_eq!(summary.groups_pruned, 1);

    let ruleset = std::sync::Arc::new(Ruleset::from_file(fixture.path("ruleset.json")).unwrap());
    let source = JsonDescriptorStore::new().read(&descriptor, ruleset).unwrap();
    let root = Owner::Node(source.logical_root().unwrap());
    assert_eq!(source.group_ids(root).len(), 3);
    assert_eq!(source.groups_by_type(root, "Bibliography").len(), 2);
    assert!(root_values(&source, "CatalogIDDigital").is_empty());
    assert_eq!(source.pages().len(), 1);

    let exported = fixture.exported(&summary);
    let root = Owner::Node(exported.logical_root().unwrap());
    assert_eq!(exported.group_ids(root).len(), 2);
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let fixture = Fixture::new();
    fixture.image("scan_a.tif");
    let descriptor = fixture.descriptor(PERSON);
    let mut request = fixture.request(descriptor.clone());
    request.dry_run = true;

    let summary = fixture
        .coordinator("cleanup_pagination = true")
        .run(&request);

    assert_eq!(summary.status, ExportStatus::Exported);
    assert_eq!(summary.pages_rebuilt, Some(1));
    assert!(!summary.written_back);
    assert!(summary.output_path.is_none());
    assert_eq!(fs::read_to_string(&descriptor).unwrap(), PERSON);
    assert!(!fixture.path("out").exists());
}

#[test]
fn test_event_location_copied_from_organizer() {
    let fixture = Fixture::new();
    let agent_folder = fixture.path("metadata").join("77");
    fs::create_dir_all(&agent_folder).unwrap();
    fs::write(
        agent_folder.join("meta.json"),
        r#"{"logical": {"id": "LOG_0000", "type": "Person", "groups": [
            {"type": "LocationGroup", "metadata": [{"type": "LocationName", "value": "Weimar"}]}
        ]}}"#,
    )
    .unwrap();
    let descriptor = fixture.descriptor(
        r#"{"logical": {"id": "LOG_0000", "type": "Event",
            "metadata": [{"type": "Published", "value": "J"}],
            "groups": [
                {"type": "Relationship", "metadata": [
                    {"type": "RelationEntityType", "value": "Agent"},
                    {"type": "Type", "value": "was organized by"},
                    {"type": "RelationProcessID", "value": "77"}
                ]},
                {"type": "Relationship", "metadata": [
                    {"type": "RelationEntityType", "value": "Agent"},
                    {"type": "Type", "value": "organized"},
                    {"type": "RelationProcessID", "value": "78"}
                ]}
            ]}}"#,
    );

    let summary = fixture
        .coordinator("add_event_location_from_agent = true")
        .run(&fixture.request(descriptor));

    assert_eq!(summary.status, ExportStatus::Exported);
    assert_eq!(summary.locations_added, 1);
    // process 78 has no descriptor
    assert_eq!(summary.errors.len(), 1);

    let doc = fixture.exported(&summary);
    let root = Owner::Node(doc.logical_root().unwrap());
    let location = doc.groups_by_type(root, "LocationGroup")[0];
    assert_eq!(
        doc.first_value(Owner::Group(location), "LocationName"),
        Some("Weimar")
    );
}

#[test]
fn test_file_group_with_populated_folder_is_planned() {
    let fixture = Fixture::new();
    fixture.image("img_01.jpg");
    let ocr = fixture.path("ocr");
    fs::create_dir_all(&ocr).unwrap();
    fs::write(ocr.join("img_01.xml"), b"<alto/>").unwrap();
    let descriptor = fixture.descriptor(PERSON);

    let summary = fixture.coordinator("").run(&fixture.request(descriptor));

    let names: Vec<_> = summary
        .plan
        .as_ref()
        .unwrap()
        .groups
        .iter()
        .map(|g| g.name.clone())
        .collect();
    assert_eq!(names, vec!["PRESENTATION", "FULLTEXT"]);
}
