//! End-to-end runs of the XML processing step.

use cfm_ir::Value;
use cfm_mapping::CoercionPolicy;
use cfm_template::TemplateLoader;
use cfm_workflow::asset::rendition_path;
use cfm_workflow::{
    Asset, Error, FsAssetStore, FsFragmentStore, InMemoryAssetStore, InMemoryFragmentStore,
    ProcessOutcome, ProcessingConfig, SkipReason, StoreError, WorkItem, XmlProcessingStep,
};
use std::fs;
use std::path::Path;

const TEMPLATE: &str = "\
title: Product
fields:
  - name: name
    type: string
  - name: price
    type: double
  - name: stock
    type: long
  - name: color
    type: string
";

const SOFA_XML: &str = "\
<product>
  <name>Red Sofa Bed</name>
  <price>12.5</price>
  <stock>42</stock>
</product>
";

const ASSET: &str = "/content/dam/products/redSofaBed.jpg";

fn loader_with_template(dir: &Path) -> TemplateLoader {
    fs::write(dir.join("product.yaml"), TEMPLATE).unwrap();
    TemplateLoader::new(vec![dir.to_path_buf()])
}

fn memory_assets(xml: &str) -> InMemoryAssetStore {
    let mut assets = InMemoryAssetStore::new();
    assets
        .insert(
            Asset::new(ASSET)
                .with_rendition("original", "image/jpeg")
                .with_rendition("cq5dam.web.1280.1280.jpeg", "image/jpeg")
                .with_rendition("export.xml", "text/xml"),
        )
        .set_content(rendition_path(ASSET, "export.xml"), xml);
    assets
}

fn memory_step(
    config: ProcessingConfig,
    xml: &str,
) -> XmlProcessingStep<InMemoryAssetStore, InMemoryFragmentStore> {
    let dir = tempfile::tempdir().unwrap();
    let loader = loader_with_template(dir.path());
    XmlProcessingStep::activate(config, &loader, memory_assets(xml), InMemoryFragmentStore::new())
        .expect("step should activate")
}

#[test]
fn rendition_payload_creates_fragment_next_to_asset() {
    let step = memory_step(ProcessingConfig::new("product"), SOFA_XML);
    let item = WorkItem::for_path(rendition_path(ASSET, "original"));

    let outcome = step.execute(&item).unwrap();

    let report = outcome.report().expect("step should complete");
    assert_eq!(report.asset, ASSET);
    assert_eq!(report.rendition, "export.xml");
    assert_eq!(report.fragment_path, "/content/dam/products/redSofaBed");
    assert_eq!(report.skipped, vec!["color"]);

    let fragment = step
        .fragments()
        .get("/content/dam/products/redSofaBed")
        .unwrap();
    assert_eq!(fragment.title, "Red Sofa Bed");
    assert_eq!(fragment.template, "product");
    assert_eq!(fragment.element("price"), Some(&Value::Decimal(12.5)));
    assert_eq!(fragment.element("stock"), Some(&Value::Integer(42)));
    assert!(fragment.element("color").is_none());
}

#[test]
fn configured_fragment_name_is_used() {
    let config = ProcessingConfig::new("product").with_fragment_name("newfragment");
    let step = memory_step(config, SOFA_XML);

    let outcome = step.execute(&WorkItem::for_path(ASSET)).unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.fragment_path, "/content/dam/products/newfragment");
    assert_eq!(report.fragment_title, "Newfragment");
}

#[test]
fn second_run_for_same_asset_fails() {
    let step = memory_step(ProcessingConfig::new("product"), SOFA_XML);
    step.execute(&WorkItem::for_path(ASSET)).unwrap();

    let result = step.execute(&WorkItem::for_path(ASSET));

    assert!(matches!(
        result,
        Err(Error::Store(StoreError::AlreadyExists { .. }))
    ));
}

#[test]
fn unknown_asset_is_skipped() {
    let step = memory_step(ProcessingConfig::new("product"), SOFA_XML);

    let outcome = step
        .execute(&WorkItem::for_path("/content/dam/products/chair.jpg"))
        .unwrap();

    assert!(matches!(
        outcome,
        ProcessOutcome::Skipped {
            reason: SkipReason::AssetNotFound(_)
        }
    ));
}

#[test]
fn asset_without_xml_rendition_is_skipped() {
    let mut config = ProcessingConfig::new("product");
    config.xml_mime_types = vec!["application/xml".to_string()];
    let step = memory_step(config, SOFA_XML);

    let outcome = step.execute(&WorkItem::for_path(ASSET)).unwrap();

    assert!(matches!(
        outcome,
        ProcessOutcome::Skipped {
            reason: SkipReason::NoXmlRendition(_)
        }
    ));
    assert!(step.fragments().is_empty());
}

#[test]
fn malformed_rendition_is_an_error() {
    let step = memory_step(ProcessingConfig::new("product"), "<product><name>Sofa</product>");

    let result = step.execute(&WorkItem::for_path(ASSET));

    assert!(matches!(result, Err(Error::Xml(_))));
    assert!(step.fragments().is_empty());
}

#[test]
fn lenient_policy_commits_valid_fields() {
    let config = ProcessingConfig::new("product").with_coercion_policy(CoercionPolicy::Lenient);
    let step = memory_step(
        config,
        "<product><name>Sofa</name><price>N/A</price><stock>1</stock></product>",
    );

    let outcome = step.execute(&WorkItem::for_path(ASSET)).unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.mapped, vec!["name", "stock"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].field, "price");
}

#[test]
fn missing_template_fails_activation() {
    let result = XmlProcessingStep::activate(
        ProcessingConfig::new("/conf/models/missing"),
        &TemplateLoader::default(),
        memory_assets(SOFA_XML),
        InMemoryFragmentStore::new(),
    );

    assert!(matches!(result, Err(Error::Template(_))));
}

#[test]
fn filesystem_stores_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let loader = loader_with_template(dir.path());
    fs::create_dir_all(dir.path().join("dam"))?;
    fs::write(dir.path().join("dam").join("redSofaBed.xml"), SOFA_XML)?;
    let out = dir.path().join("out");

    let step = XmlProcessingStep::activate(
        ProcessingConfig::new("product"),
        &loader,
        FsAssetStore::with_root(dir.path()),
        FsFragmentStore::with_root(&out),
    )?;
    let outcome = step.execute(&WorkItem::for_path("/dam/redSofaBed.xml"))?;
    assert!(outcome.is_completed());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("dam").join("redSofaBed.json"))?)?;
    assert_eq!(written["title"], "Red Sofa Bed");
    assert_eq!(written["template"], "product");
    assert_eq!(written["elements"]["name"], "Red Sofa Bed");
    assert_eq!(written["elements"]["stock"], 42);
    Ok(())
}
