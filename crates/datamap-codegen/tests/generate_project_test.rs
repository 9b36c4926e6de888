//! Integration tests: generating a project tree from a schema.

use datamap_codegen::{Error, GeneratorConfig, Generator};
use datamap_schema::{SchemaLoader, SchemaParser};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCHEMA: &str = "
user:
  id: number <=> id
  name: string <=> name
  companyName: string <=> company.name
  companyAddress: string <=> company.address.street

order:
  id: number
  total: number <=> amount.total
";

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn test_generate_writes_three_files_per_group() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let document = SchemaParser::new().parse(SCHEMA)?;
    let generator = Generator::new(dir.path(), GeneratorConfig::default());

    let report = generator.generate(&document)?;
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.file_count(), 6);

    let user_dir = dir.path().join("app").join("user");
    let entity = read(&user_dir.join("user.entity.ts"));
    assert_eq!(
        entity,
        "\
export interface UserEntity {
  id: number
  name: string
  company: {
    name: string
    address: {
      street: string
    }
  }
}
"
    );

    let model = read(&user_dir.join("user.model.ts"));
    assert!(model.contains("  companyAddress: string\n"));

    let mapper = read(&user_dir.join("user.mapper.ts"));
    assert!(mapper.contains("companyAddress: 'company.address.street',"));
    assert!(mapper.contains("new Mapper<UserEntity, UserModel>(transformationMap)"));

    assert!(dir.path().join("app/order/order.mapper.ts").exists());
    Ok(())
}

#[test]
fn test_existing_output_aborts_without_writing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let document = SchemaParser::new().parse(SCHEMA)?;

    // Only the order model exists beforehand; the user group is untouched.
    let order_dir = dir.path().join("app").join("order");
    fs::create_dir_all(&order_dir)?;
    fs::write(order_dir.join("order.model.ts"), "// hand written\n")?;

    let generator = Generator::new(dir.path(), GeneratorConfig::default());
    let err = generator.generate(&document).unwrap_err();

    match &err {
        Error::OutputExists { conflicts } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].group, "order");
            assert!(conflicts[0].path.ends_with("order.model.ts"));
        }
        other => panic!("Expected OutputExists, got {other:?}"),
    }
    assert!(err.to_string().contains("group 'order'"));

    assert!(!dir.path().join("app/user").exists());
    assert!(!order_dir.join("order.mapper.ts").exists());
    assert_eq!(read(&order_dir.join("order.model.ts")), "// hand written\n");
    Ok(())
}

#[test]
fn test_overwrite_replaces_existing_output() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let document = SchemaParser::new().parse(SCHEMA)?;

    Generator::new(dir.path(), GeneratorConfig::default()).generate(&document)?;
    let target = dir.path().join("app/user/user.model.ts");
    fs::write(&target, "stale")?;

    Generator::new(dir.path(), GeneratorConfig::new().overwrite(true)).generate(&document)?;
    assert!(read(&target).starts_with("export interface UserModel {"));
    Ok(())
}

#[test]
fn test_clean_module_removes_stale_groups() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let stale = dir.path().join("gen/invoice/invoice.model.ts");
    fs::create_dir_all(stale.parent().expect("parent"))?;
    fs::write(&stale, "old")?;

    let config = GeneratorConfig::new().module_path("gen").clean_module(true);
    let document = SchemaParser::new().parse(SCHEMA)?;
    Generator::new(dir.path(), config).generate(&document)?;

    assert!(!stale.exists());
    assert!(dir.path().join("gen/user/user.model.ts").exists());
    Ok(())
}

#[test]
fn test_colliding_groups_leave_module_dir_intact() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let kept = dir.path().join("app/handwritten/keep.ts");
    fs::create_dir_all(kept.parent().expect("parent"))?;
    fs::write(&kept, "export const keep = true\n")?;

    let document =
        SchemaParser::new().parse("user_profile:\n  id: number\nuserProfile:\n  id: number\n")?;
    let generator = Generator::new(dir.path(), GeneratorConfig::new().clean_module(true));
    let err = generator.generate(&document).unwrap_err();

    assert!(matches!(err, Error::DuplicateOutput { .. }));
    assert_eq!(read(&kept), "export const keep = true\n");
    assert!(!dir.path().join("app/user-profile").exists());
    Ok(())
}

#[test]
fn test_run_without_schema_reports_missing_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let generator = Generator::new(dir.path(), GeneratorConfig::default());

    let err = generator.run(&SchemaLoader::new(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(datamap_schema::Error::SchemaNotFound(_))
    ));
    assert!(!dir.path().join("app").exists());
    Ok(())
}

#[test]
fn test_run_from_project_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let loader = SchemaLoader::new(dir.path());
    loader.init()?;
    GeneratorConfig::init(dir.path())?;

    let config = GeneratorConfig::load(dir.path())?;
    let report = Generator::new(dir.path(), config).run(&loader)?;

    assert_eq!(report.groups[0].type_name, "User");
    assert_eq!(report.groups[0].files.len(), 3);
    Ok(())
}
