//! Process command
//!
//! Runs the pipeline on one image and writes both derived images.

use crate::ProcessArgs;
use anyhow::{Context, Result};
use edgepipe_ops::pipeline;
use std::path::Path;
use tracing::{info, trace};

pub fn run(args: ProcessArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "process::run");

    let raw = super::read_bytes(&args.input)?;
    let options = super::encode_options(&args.output);
    let output = pipeline::process(&raw, &options)
        .with_context(|| format!("Failed to process: {}", args.input.display()))?;

    let dir = args.input.parent().unwrap_or(Path::new(""));
    let (default_blurred, default_edges) = super::derived_paths(dir, &super::file_stem(&args.input));
    let blurred = args.blurred.unwrap_or(default_blurred);
    let edges = args.edges.unwrap_or(default_edges);

    super::write_pair(&blurred, &output.blurred, &edges, &output.edges)?;

    info!(
        input = %args.input.display(),
        blurred = %blurred.display(),
        edges = %edges.display(),
        "Image processed"
    );

    if verbose > 0 {
        println!("{} -> {}, {}", args.input.display(), blurred.display(), edges.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputArgs;
    use edgepipe_io::{read, Variant};
    use std::fs;
    use std::path::PathBuf;

    fn args(input: PathBuf) -> ProcessArgs {
        ProcessArgs {
            input,
            blurred: None,
            edges: None,
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_default_output_names() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a3.pgm");
        fs::write(&input, "P2\n4 4\n255\n9 9 9 9 9 9 9 9 9 9 9 9 9 9 9 9\n").unwrap();

        run(args(input), 0).unwrap();

        let blurred = read(dir.path().join("blurred_a3.pgm")).unwrap();
        let edges = read(dir.path().join("edges_a3.pgm")).unwrap();
        assert_eq!(blurred.dimensions(), (4, 4));
        assert_eq!(edges.dimensions(), (4, 4));
    }

    #[test]
    fn test_explicit_outputs_binary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("src.pgm");
        let mut raw = b"P5\n3 3\n255\n".to_vec();
        raw.extend_from_slice(&[0, 0, 0, 0, 255, 0, 0, 0, 0]);
        fs::write(&input, raw).unwrap();

        let mut process_args = args(input);
        process_args.blurred = Some(dir.path().join("b.pgm"));
        process_args.edges = Some(dir.path().join("e.pgm"));
        process_args.output.binary = true;
        run(process_args, 1).unwrap();

        let bytes = fs::read(dir.path().join("e.pgm")).unwrap();
        assert_eq!(Variant::detect(&bytes).unwrap(), Variant::Binary);
        assert!(dir.path().join("b.pgm").exists());
        assert!(!dir.path().join("blurred_src.pgm").exists());
    }

    #[test]
    fn test_bad_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.pgm");
        fs::write(&input, "P9\n1 1\n255\n0\n").unwrap();

        let err = run(args(input), 0).unwrap_err();
        assert!(err.to_string().contains("Failed to process"));
        assert!(!dir.path().join("blurred_bad.pgm").exists());
        assert!(!dir.path().join("edges_bad.pgm").exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path().join("none.pgm")), 0).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
