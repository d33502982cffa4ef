use std::fs;
use std::path::PathBuf;

pub fn run_schema(out_dir: PathBuf) -> color_eyre::Result<()> {
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(tokport_domain::ExportStats, "export_stats.schema.json");
    dump!(tokport_domain::PlannedFile, "planned_file.schema.json");
    dump!(tokport_domain::PublishOutcome, "publish_outcome.schema.json");
    dump!(tokport_domain::ConnectionInfo, "connection_info.schema.json");
    crate::ui_ok!("Schemas written to {}", crate::ui::em(&out_dir.display().to_string()));
    Ok(())
}
