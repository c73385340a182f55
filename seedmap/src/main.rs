use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seedmap_core::catalog::{Dimension, McVersion, StructureKind};
use seedmap_core::coords::BoundingBox;
use seedmap_core::fallback::FallbackBinding;
use seedmap_core::{GeneratorBinding, find_structures, render_biome_image};
use seedmap_cubiomes::{CubiomesBinding, default_library_name};

#[derive(Parser)]
#[command(
    name = "seedmap",
    about = "Biome previews and structure search for a world seed"
)]
struct Args {
    /// Path to a cubiomes shared library. Without it, an approximate
    /// built-in sampler is used and results will not match real worlds.
    #[arg(long, value_name = "PATH", global = true)]
    cubiomes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a biome preview PNG around a center point.
    Render {
        #[arg(short, long)]
        seed: u64,

        /// Game version, e.g. "1.21" or "1.18.2".
        #[arg(long, default_value = "1.21")]
        version: String,

        /// Dimension: minecraft:overworld, minecraft:the_nether or
        /// minecraft:the_end.
        #[arg(long, default_value = "minecraft:overworld")]
        dimension: String,

        #[arg(long, default_value_t = 0)]
        center_x: i32,

        #[arg(long, default_value_t = 0)]
        center_z: i32,

        /// Half-extent of the rendered window, in blocks.
        #[arg(long, default_value_t = 2048)]
        radius: i32,

        #[arg(long, default_value_t = 512)]
        width: u32,

        #[arg(long, default_value_t = 512)]
        height: u32,

        #[arg(short, long, default_value = "seedmap.png")]
        out: PathBuf,
    },

    /// Enumerate structures inside a bounding box.
    Find {
        #[arg(short, long)]
        seed: u64,

        #[arg(long, default_value = "1.21")]
        version: String,

        #[arg(long, default_value = "minecraft:overworld")]
        dimension: String,

        #[arg(long)]
        min_x: i32,

        #[arg(long)]
        min_z: i32,

        #[arg(long)]
        max_x: i32,

        #[arg(long)]
        max_z: i32,

        /// Structure id, e.g. minecraft:village; repeatable. All kinds
        /// known for the dimension when omitted.
        #[arg(long = "structure", value_name = "ID")]
        structures: Vec<String>,

        /// Maximum number of results.
        #[arg(long, default_value_t = 256)]
        limit: usize,

        /// Emit results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn open_binding(cubiomes: Option<&PathBuf>) -> Result<Box<dyn GeneratorBinding>> {
    match cubiomes {
        Some(path) => {
            let binding = CubiomesBinding::load(path)
                .with_context(|| format!("loading cubiomes library from {}", path.display()))?;
            Ok(Box::new(binding))
        }
        // No path given: try the conventional library name next to the
        // binary, then fall back to the built-in sampler.
        None => match CubiomesBinding::load(Path::new(default_library_name())) {
            Ok(binding) => Ok(Box::new(binding)),
            Err(err) => {
                log::warn!("{err}; using the approximate built-in sampler");
                Ok(Box::new(FallbackBinding))
            }
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let binding = open_binding(args.cubiomes.as_ref())?;

    match args.command {
        Command::Render {
            seed,
            version,
            dimension,
            center_x,
            center_z,
            radius,
            width,
            height,
            out,
        } => {
            let version = McVersion::from_version_text(&version);
            let dimension = Dimension::from_resource_id(&dimension);
            let buffer = render_biome_image(
                binding.as_ref(),
                seed,
                version,
                dimension,
                center_x,
                center_z,
                radius,
                width,
                height,
            )?;
            let image = image::RgbaImage::from_raw(
                buffer.width(),
                buffer.height(),
                buffer.to_rgba_bytes(),
            )
            .context("pixel buffer did not match image dimensions")?;
            image
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!(
                "wrote {}x{} preview of {} to {}",
                buffer.width(),
                buffer.height(),
                dimension,
                out.display()
            );
        }

        Command::Find {
            seed,
            version,
            dimension,
            min_x,
            min_z,
            max_x,
            max_z,
            structures,
            limit,
            json,
        } => {
            let version = McVersion::from_version_text(&version);
            let dimension = Dimension::from_resource_id(&dimension);
            let kinds = resolve_kinds(&structures, dimension);
            let bounds = BoundingBox::new(min_x, min_z, max_x, max_z);
            let outcome = find_structures(
                binding.as_ref(),
                seed,
                version,
                dimension,
                bounds,
                &kinds,
                limit,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.hits)?);
            } else {
                for hit in &outcome.hits {
                    println!("{}\tx={}\tz={}", hit.kind, hit.x, hit.z);
                }
                println!("{} structure(s) found", outcome.count());
            }
            if outcome.truncated {
                log::warn!(
                    "results truncated at --limit {limit}; rerun with a larger limit for completeness"
                );
            }
        }
    }

    Ok(())
}

/// Map requested structure ids to kinds valid in the dimension, or every
/// known kind for the dimension if none were requested. Ids that do not
/// resolve are skipped with a warning, matching the search's skip-not-fail
/// semantics.
fn resolve_kinds(requested: &[String], dimension: Dimension) -> Vec<StructureKind> {
    if requested.is_empty() {
        return StructureKind::for_dimension(dimension).to_vec();
    }
    requested
        .iter()
        .filter_map(|id| {
            let kind = StructureKind::parse(id, dimension);
            if kind.is_none() {
                log::warn!("unknown structure id {id:?} for {dimension}, skipping");
            }
            kind
        })
        .collect()
}
