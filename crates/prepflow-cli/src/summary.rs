use std::fmt::Display;
use std::io;

use console::{Style, Term};
use prepflow_core::config::{PipelineConfig, StackingConfig};
use prepflow_core::options::FlatBiasSource;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Writes the summary to stderr so a script on stdout stays clean.
struct Summary {
    term: Term,
    s: Styles,
}

impl Summary {
    fn line(&self, text: impl Display) -> io::Result<()> {
        self.term.write_line(&format!("  {text}"))
    }

    fn blank(&self) -> io::Result<()> {
        self.term.write_line("")
    }

    fn header(&self, name: &str) -> io::Result<()> {
        self.line(self.s.header.apply_to(name))
    }

    fn row(&self, label: &str, value: impl Display) -> io::Result<()> {
        self.line(format_args!(
            "  {:<12}{}",
            self.s.label.apply_to(label),
            value
        ))
    }

    fn value(&self, label: &str, value: impl Display) -> io::Result<()> {
        self.row(label, self.s.value.apply_to(value))
    }

    fn method(&self, label: &str, value: impl Display) -> io::Result<()> {
        self.row(label, self.s.method.apply_to(value))
    }

    fn toggle(&self, label: &str, on: bool) -> io::Result<()> {
        if on {
            self.row(label, self.s.method.apply_to("on"))
        } else {
            self.row(label, self.s.disabled.apply_to("off"))
        }
    }

    fn master(&self, label: &str, enabled: bool, path: &str) -> io::Result<()> {
        if enabled {
            self.row(label, self.s.path.apply_to(path))
        } else {
            self.row(label, self.s.disabled.apply_to("not used"))
        }
    }
}

/// Print the effective pipeline in readable form.
pub fn print_pipeline_summary(config: &PipelineConfig) -> io::Result<()> {
    let out = Summary {
        term: Term::stderr(),
        s: Styles::new(),
    };
    let s = &out.s;

    out.blank()?;
    out.line(s.title.apply_to("Prepflow Pipeline"))?;
    out.line(s.title.apply_to("\u{2550}".repeat(17)))?;
    out.blank()?;

    // Lights
    let conv = &config.convert;
    out.header("Lights")?;
    out.value("Basename", &conv.basename)?;
    out.value("Start", &conv.start_index)?;
    out.row("Output", s.path.apply_to(&conv.output_dir))?;
    out.toggle("Debayer", conv.debayer)?;
    out.blank()?;

    // Masters
    let masters = &config.masters;
    out.header("Masters")?;
    out.toggle("Bias", masters.create_bias)?;
    if masters.create_flat {
        match masters.flat_bias_source {
            FlatBiasSource::SyntheticBias => out.method(
                "Flat",
                format_args!("synthetic bias {}", masters.synthetic_bias.trim()),
            )?,
            source => out.method("Flat", source)?,
        }
    } else {
        out.toggle("Flat", false)?;
    }
    out.toggle("Dark", masters.create_dark)?;
    out.blank()?;

    // Calibration
    let cal = &config.calibration;
    out.header("Calibration")?;
    out.master("Dark", cal.use_dark, &cal.dark_path)?;
    out.master("Flat", cal.use_flat, &cal.flat_path)?;
    out.master("Bias", cal.use_bias, &cal.bias_path)?;
    out.method("Cosmetic", cal.cosmetic)?;
    out.method("Dark opt.", cal.dark_optimization)?;
    out.toggle("Debayer", cal.debayer)?;
    out.blank()?;

    // Registration
    let reg = &config.registration;
    out.header("Registration")?;
    out.method("Transform", reg.transform)?;
    out.value("Layer", reg.layer)?;
    out.toggle("Two-pass", reg.two_pass)?;
    if reg.drizzle {
        out.method(
            "Drizzle",
            format_args!(
                "{}x pixfrac {} {}",
                reg.drizzle_scale, reg.drizzle_pixfrac, reg.drizzle_kernel
            ),
        )?;
    } else {
        out.method("Interp.", reg.interpolation)?;
    }
    if reg.two_pass {
        out.method("Framing", reg.framing)?;
    }
    out.blank()?;

    print_stacking(&out, &config.stacking)?;
    out.blank()
}

fn print_stacking(out: &Summary, stk: &StackingConfig) -> io::Result<()> {
    let s = &out.s;
    out.header("Stacking")?;
    out.method("Method", stk.method)?;
    if stk.method.uses_rejection() {
        out.method("Rejection", stk.rejection)?;
        out.value("Sigma", format_args!("{} / {}", stk.sigma_low, stk.sigma_high))?;
        out.method("Norm.", stk.normalization)?;
        out.method("Weighting", stk.weighting)?;
    }
    out.row("Output", s.path.apply_to(&stk.output))?;
    if stk.maximize_framing || stk.feather > 0 {
        out.toggle("Maximize", stk.maximize_framing)?;
        out.value("Feather", format_args!("{} px", stk.feather))?;
    }

    if !stk.method.uses_rejection() || stk.filters.is_empty() {
        return out.row("Filters", s.disabled.apply_to("none"));
    }
    out.header("Filters")?;
    for (i, filter) in stk.filters.iter().enumerate() {
        out.line(format_args!(
            "  {}. {} {}{}",
            s.label.apply_to(i + 1),
            s.value.apply_to(filter.kind),
            filter.threshold,
            filter.unit.suffix()
        ))?;
    }
    Ok(())
}
