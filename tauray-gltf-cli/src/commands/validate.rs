use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

use crate::ui::{error, info, success};

/// Render a scene headless and compare the frame against a reference image
#[derive(Args)]
pub struct ValidateCommand {
    /// Renderer executable to invoke
    #[arg(long)]
    pub executable: PathBuf,

    /// Scene file to render
    #[arg(long)]
    pub scene: PathBuf,

    /// Renderer backend name, forwarded as --renderer=
    #[arg(long)]
    pub renderer: String,

    /// Render width in pixels
    #[arg(long, default_value = "512")]
    pub width: u32,

    /// Render height in pixels
    #[arg(long, default_value = "512")]
    pub height: u32,

    /// Reference image to compare against
    #[arg(long)]
    pub reference: PathBuf,

    /// ImageMagick compare metric
    #[arg(long, default_value = "mse")]
    pub metric: String,

    /// Maximum allowed difference before the render counts as broken
    #[arg(long)]
    pub tolerance: f64,
}

impl ValidateCommand {
    pub fn execute(&self) -> Result<()> {
        let tmpdir = tempfile::Builder::new()
            .prefix("tauray-test")
            .tempdir()
            .context("Failed to create temporary render directory")?;
        let frame_base = tmpdir.path().join("frame");

        let render_args = self.renderer_args(&frame_base);
        info(&format!(
            "Rendering {} with the '{}' renderer",
            self.scene.display(),
            self.renderer
        ));
        debug!(
            "Renderer command: {} {}",
            self.executable.display(),
            render_args.join(" ")
        );

        let render = Command::new(&self.executable)
            .args(&render_args)
            .output()
            .with_context(|| format!("Failed to run renderer {}", self.executable.display()))?;
        if !render.status.success() {
            self.echo_render_command(&render_args);
            error(&format!("Renderer exited with {}", render.status));
            echo_captured_output(&render);
            bail!("Render failed");
        }

        let frame = tmpdir.path().join("frame.exr");
        let compare = Command::new("compare")
            .arg("-quiet")
            .arg("-metric")
            .arg(&self.metric)
            .arg(&frame)
            .arg(&self.reference)
            // Discard the difference image, only the metric matters.
            .arg("null:")
            .output()
            .context("Failed to run ImageMagick compare")?;
        // Compare exits 1 when the images differ, which is still a valid
        // measurement. Anything beyond that is a tool failure.
        match compare.status.code() {
            Some(0) | Some(1) => {}
            _ => {
                self.echo_render_command(&render_args);
                error(&format!("Compare exited with {}", compare.status));
                echo_captured_output(&compare);
                bail!("Compare failed");
            }
        }

        let stderr = String::from_utf8_lossy(&compare.stderr);
        let difference = parse_difference(&stderr)?;
        if difference > self.tolerance {
            self.echo_render_command(&render_args);
            error(&format!(
                "Difference {} exceeds tolerance {}",
                difference, self.tolerance
            ));
            bail!("Render does not match reference");
        }

        success(&format!(
            "Difference {} within tolerance {}",
            difference, self.tolerance
        ));
        Ok(())
    }

    fn renderer_args(&self, frame_base: &Path) -> Vec<String> {
        let mut args = vec![
            format!("--renderer={}", self.renderer),
            format!("--width={}", self.width),
            format!("--height={}", self.height),
            format!("--headless={}", frame_base.display()),
            self.scene.display().to_string(),
        ];
        // The DDISH-GI renderer converges over time, so give it warmup
        // frames and clamp indirect light before sampling a frame.
        if self.renderer == "dshgi" {
            args.push("--warmup-frames=100".to_string());
            args.push("--indirect-clamping=10".to_string());
        }
        args
    }

    fn echo_render_command(&self, args: &[String]) {
        println!("{} {}", self.executable.display(), args.join(" "));
    }
}

fn echo_captured_output(output: &Output) {
    println!("stdout:\n{}", String::from_utf8_lossy(&output.stdout));
    println!("stderr:\n{}", String::from_utf8_lossy(&output.stderr));
}

/// The first whitespace-delimited token of compare's stderr is the metric
/// value; some metrics append extras like a normalized value in parentheses.
fn parse_difference(stderr: &str) -> Result<f64> {
    let token = stderr
        .split_whitespace()
        .next()
        .context("Compare produced no metric output")?;
    token
        .parse()
        .with_context(|| format!("Unparseable metric value '{}'", token))
}
