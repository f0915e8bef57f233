//! lattice-rig CLI
//!
//! Thin wrapper over the library: loads a JSON scene document, runs the
//! requested operation, and writes the document back. The `build`
//! subcommand stands in for the interactive name prompt of a host
//! session, with the same `C_Body` default.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use lattice_rig::core::{
    export_controls, import_controls, BuildOptions, BuildReport, HierarchyBuilder,
    MemoryDocument, SceneDocument, Vec3,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lattice-rig")]
#[command(version = lattice_rig::VERSION)]
#[command(about = "Build animator-facing control hierarchies over a lattice deformer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the full control rig over the scene's selected geometry
    Build {
        /// Scene document to operate on
        #[arg(long, value_name = "FILE")]
        scene: PathBuf,
        /// Rig name; the first token picks the side (L/C/R)
        #[arg(long, default_value = "C_Body")]
        name: String,
        /// Geometry to select before building (defaults to the scene's
        /// stored selection)
        #[arg(long, value_name = "NODE", num_args = 1..)]
        select: Vec<String>,
        /// Master visibility switch node to look for
        #[arg(long, default_value = "Control_Ctrl")]
        vis_switch: String,
        /// Top-level utility group to file the lattice under
        #[arg(long, default_value = "Utility_Grp")]
        utility_group: String,
        /// Where to write the resulting scene (default: in place)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Export every control's shapes and colors to a library file
    ExportShapes {
        #[arg(long, value_name = "FILE")]
        scene: PathBuf,
        #[arg(long, value_name = "FILE")]
        library: PathBuf,
    },
    /// Restore control shapes and colors from a library file
    ImportShapes {
        #[arg(long, value_name = "FILE")]
        scene: PathBuf,
        #[arg(long, value_name = "FILE")]
        library: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write a small scene with selectable geometry, for trying out the
    /// builder
    DemoScene {
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            scene,
            name,
            select,
            vis_switch,
            utility_group,
            output,
        } => {
            let mut doc = MemoryDocument::load_from_file(&scene)
                .with_context(|| format!("loading scene {}", scene.display()))?;
            if !select.is_empty() {
                for node in &select {
                    if !doc.exists(node) {
                        bail!("selection target \"{node}\" is not in the scene");
                    }
                }
                doc.set_selection(&select);
            }

            let builder = HierarchyBuilder::new(BuildOptions {
                vis_switch,
                utility_group,
            });
            let report = builder.build(&mut doc, &name)?;

            let target = output.unwrap_or(scene);
            doc.save_to_file(&target)
                .with_context(|| format!("writing scene {}", target.display()))?;
            print_report(&report);
        }
        Command::ExportShapes { scene, library } => {
            let doc = MemoryDocument::load_from_file(&scene)?;
            let count = export_controls(&doc, &library)?;
            println!("exported {count} controls to {}", library.display());
        }
        Command::ImportShapes {
            scene,
            library,
            output,
        } => {
            let mut doc = MemoryDocument::load_from_file(&scene)?;
            let report = import_controls(&mut doc, &library)?;
            let target = output.unwrap_or(scene);
            doc.save_to_file(&target)?;
            println!(
                "restored {} controls, skipped {}",
                report.restored.len(),
                report.skipped.len()
            );
        }
        Command::DemoScene { output } => {
            let mut doc = MemoryDocument::new();
            doc.create_geometry(
                "Body_Geo",
                Vec3::new(-2.0, 0.0, -2.0),
                Vec3::new(2.0, 4.0, 2.0),
            )?;
            doc.create_transform("Control_Ctrl", None)?;
            doc.create_transform("Utility_Grp", None)?;
            doc.set_selection(&["Body_Geo".to_string()]);
            doc.save_to_file(&output)?;
            println!("wrote demo scene to {}", output.display());
        }
    }
    Ok(())
}

fn print_report(report: &BuildReport) {
    println!("built rig \"{}\"", report.rig_name);
    println!("  base:   {}", report.base_ctl);
    println!("  main:   {}", report.main_ctl);
    for (row, ctl) in &report.row_ctls {
        println!("  row:    {} ({})", ctl, row.tag());
    }
    println!("  leaves: {}", report.leaf_ctls.len());
    println!("  proxies: {}", report.proxies.len());
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    for follow_up in &report.follow_ups {
        println!("  follow-up: {follow_up}");
    }
}
