use tracing::debug;

use crate::config::{PipelineConfig, RegistrationConfig};
use crate::consts::{
    CALIBRATED_PREFIX, DIR_BIASES, DIR_DARKS, DIR_FLATS, DIR_LIGHTS, DIR_MASTERS, DIR_PROCESS,
    DRIZZLE_PIXFRAC_RANGE, DRIZZLE_SCALE_RANGE, LIVETIME_TEMPLATE, MASTER_REJECTION_SIGMA,
    REQUIRED_VERSION, SCRIPT_TITLE,
};
use crate::options::{CosmeticCorrection, FlatBiasSource, Interpolation, Normalization, Transform};
use crate::resolve::resolve;
use crate::tokens::Token;

use super::line::{decimal, Command, ScriptLine};
use super::workdir::WorkDir;
use super::Script;

/// Resolve a raw configuration and compile the result.
pub fn generate(raw: &PipelineConfig) -> Script {
    compile(&resolve(raw))
}

/// Compile an effective configuration into a script.
///
/// Never fails: an empty optional value drops its flag, and a section whose
/// required input is missing degrades instead of aborting, so there is
/// always a script to review.
pub fn compile(cfg: &PipelineConfig) -> Script {
    let mut c = ScriptCompiler::new(cfg);
    c.header();
    if cfg.masters.create_bias {
        c.bias_master();
    }
    if cfg.masters.create_flat {
        c.flat_master();
    }
    if cfg.masters.create_dark {
        c.dark_master();
    }
    c.lights();
    c.calibration();
    c.registration();
    c.stacking();
    c.post_processing();
    debug!(
        lines = c.lines.len(),
        final_dir = %c.cwd,
        "Script compiled"
    );
    Script { lines: c.lines }
}

struct ScriptCompiler<'a> {
    cfg: &'a PipelineConfig,
    lines: Vec<ScriptLine>,
    cwd: WorkDir,
}

impl<'a> ScriptCompiler<'a> {
    fn new(cfg: &'a PipelineConfig) -> Self {
        Self {
            cfg,
            lines: Vec::new(),
            cwd: WorkDir::root(),
        }
    }

    fn comment(&mut self, text: &str) {
        self.lines.push(ScriptLine::Comment(text.to_string()));
    }

    fn blank(&mut self) {
        self.lines.push(ScriptLine::Blank);
    }

    fn emit(&mut self, command: Command) {
        self.lines.push(ScriptLine::Command {
            text: command.finish(),
            cwd: self.cwd.clone(),
        });
    }

    /// Emit `cd <path>` and move the cursor.
    fn cd(&mut self, path: &str) {
        self.emit(Command::new("cd").arg(path));
        self.cwd.change(path);
    }

    fn header(&mut self) {
        self.comment(SCRIPT_TITLE);
        self.emit(Command::new("requires").arg(REQUIRED_VERSION));
        self.blank();
    }

    /// Convert a raw-frame folder into a sequence inside the processing folder.
    fn convert_calibration_frames(&mut self, dir: &str, name: &str) {
        self.cd(dir);
        self.emit(Command::new("convert").arg(name).opt("out", DIR_PROCESS));
        self.cd(DIR_PROCESS);
    }

    fn stack_master(&mut self, sequence: &str, norm: Normalization, master: &str) {
        self.emit(
            Command::new("stack")
                .arg(sequence)
                .arg("rej")
                .arg(MASTER_REJECTION_SIGMA)
                .arg(norm.flag())
                .opt("out", format_args!("{DIR_MASTERS}/{master}")),
        );
    }

    fn bias_master(&mut self) {
        debug!("Emitting master bias");
        self.comment("--- Master Bias ---");
        self.convert_calibration_frames(DIR_BIASES, "bias");
        self.stack_master("bias", Normalization::None, "bias_stacked");
        self.cd("..");
        self.blank();
    }

    fn flat_master(&mut self) {
        debug!("Emitting master flat");
        let cfg = self.cfg;
        let masters = &cfg.masters;
        self.comment("--- Master Flat ---");
        self.convert_calibration_frames(DIR_FLATS, "flat");

        let synthetic = masters.synthetic_bias.trim();
        let bias = match masters.flat_bias_source {
            FlatBiasSource::MasterBias => Some(format!("{DIR_MASTERS}/bias_stacked")),
            FlatBiasSource::SyntheticBias if !synthetic.is_empty() => {
                Some(format!("'={synthetic}'"))
            }
            FlatBiasSource::SyntheticBias | FlatBiasSource::None => None,
        };
        let sequence = match bias {
            Some(bias) => {
                self.emit(Command::new("calibrate").arg("flat").opt("bias", bias));
                format!("{CALIBRATED_PREFIX}flat")
            }
            None => "flat".to_string(),
        };

        self.stack_master(&sequence, Normalization::Mul, "pp_flat_stacked");
        self.cd("..");
        self.blank();
    }

    fn dark_master(&mut self) {
        debug!("Emitting master dark");
        self.comment("--- Master Dark ---");
        self.convert_calibration_frames(DIR_DARKS, "dark");
        self.stack_master("dark", Normalization::None, "dark_stacked");
        self.cd("..");
        self.blank();
    }

    fn lights(&mut self) {
        let cfg = self.cfg;
        let conv = &cfg.convert;
        self.comment("--- Lights Conversion ---");
        self.cd(DIR_LIGHTS);
        self.emit(
            Command::new("convert")
                .arg(conv.basename.trim())
                .opt("start", conv.start_index.trim())
                .opt("out", conv.output_dir.trim())
                .arg_if(conv.debayer, "-debayer"),
        );
        let out_dir = match conv.output_dir.trim() {
            "" => DIR_PROCESS,
            dir => dir,
        };
        self.cd(out_dir);
        self.blank();
    }

    fn calibration(&mut self) {
        let cfg = self.cfg;
        let cal = &cfg.calibration;
        self.comment("--- Calibration ---");

        let mut cmd = Command::new("calibrate")
            .arg(cal.sequence.trim())
            .opt("dark", enabled_path(cal.use_dark, &cal.dark_path))
            .opt("flat", enabled_path(cal.use_flat, &cal.flat_path))
            .opt("bias", enabled_path(cal.use_bias, &cal.bias_path));

        cmd = match cal.cosmetic {
            CosmeticCorrection::None => cmd,
            CosmeticCorrection::FromDark => cmd
                .arg("-cc=dark")
                .opt("coldsigma", decimal(cal.cold_sigma))
                .opt("hotsigma", decimal(cal.hot_sigma)),
            CosmeticCorrection::BadPixelMap => match cal.bpm_path.trim() {
                "" => cmd,
                bpm => cmd.arg("-cc=bpm").arg(bpm),
            },
        };

        cmd = cmd
            .arg_if(cal.cfa, "-cfa")
            .arg_if(cal.equalize_cfa, "-equalize_cfa")
            .arg_if(cal.debayer, "-debayer")
            .opt("prefix", cal.prefix.trim())
            .arg_if(cal.fix_xtrans, "-fix_xtrans")
            .arg(cal.dark_optimization.flag().unwrap_or_default());

        self.emit(cmd);
        self.blank();
    }

    fn registration(&mut self) {
        let cfg = self.cfg;
        let reg = &cfg.registration;
        self.comment("--- Registration ---");
        let sequence = reg.sequence.trim();

        if reg.two_pass {
            self.emit(
                Command::new("register")
                    .arg(sequence)
                    .arg("-2pass")
                    .opt("layer", reg.layer.channel())
                    .opt("minpairs", reg.min_pairs)
                    .opt("maxstars", reg.max_stars),
            );

            let apply = Command::new("seqapplyreg").arg(sequence);
            let apply = if reg.drizzle {
                self.drizzle_flags(apply, reg)
            } else {
                apply
                    .opt("interp", reg.interpolation.token())
                    .arg(reg.distortion.flag().unwrap_or_default())
            };
            self.emit(
                apply
                    .opt("framing", reg.framing.token())
                    .opt("prefix", reg.prefix.trim()),
            );
        } else {
            let cmd = Command::new("register")
                .arg(sequence)
                .arg_if(
                    reg.transform != Transform::Homography,
                    format_args!("-transf={}", reg.transform.token()),
                )
                .opt("layer", reg.layer.channel())
                .opt("minpairs", reg.min_pairs)
                .opt("maxstars", reg.max_stars);
            let cmd = if reg.drizzle {
                self.drizzle_flags(cmd, reg)
            } else {
                cmd.arg_if(
                    reg.interpolation != Interpolation::Lanczos4,
                    format_args!("-interp={}", reg.interpolation.token()),
                )
                .arg(reg.distortion.flag().unwrap_or_default())
            };
            self.emit(cmd.opt("prefix", reg.prefix.trim()));
        }
        self.blank();
    }

    fn drizzle_flags(&self, cmd: Command, reg: &RegistrationConfig) -> Command {
        let cfg = self.cfg;
        let cal = &cfg.calibration;
        let scale = reg
            .drizzle_scale
            .clamp(DRIZZLE_SCALE_RANGE.0, DRIZZLE_SCALE_RANGE.1);
        let pixfrac = reg
            .drizzle_pixfrac
            .clamp(DRIZZLE_PIXFRAC_RANGE.0, DRIZZLE_PIXFRAC_RANGE.1);
        cmd.arg("-drizzle")
            .opt("scale", decimal(scale))
            .opt("pixfrac", decimal(pixfrac))
            .opt("kernel", reg.drizzle_kernel.token())
            .opt("flat", enabled_path(cal.use_flat, &cal.flat_path))
    }

    fn stacking(&mut self) {
        let cfg = self.cfg;
        let stk = &cfg.stacking;
        self.comment("--- Stacking ---");

        let mut cmd = Command::new("stack")
            .arg(stk.sequence.trim())
            .arg(stk.method.token());

        if stk.method.uses_rejection() {
            if let Some(letter) = stk.rejection.letter() {
                cmd = cmd
                    .arg(letter)
                    .arg(decimal(stk.sigma_low))
                    .arg(decimal(stk.sigma_high));
            }
            cmd = cmd
                .arg(stk.normalization.flag())
                .arg(stk.weighting.flag().unwrap_or_default());
            for filter in &stk.filters {
                let threshold = filter.threshold.trim();
                if threshold.is_empty() {
                    continue;
                }
                cmd = cmd.arg(format_args!(
                    "-filter-{}={}{}",
                    filter.kind.token(),
                    threshold,
                    filter.unit.suffix()
                ));
            }
        }

        cmd = cmd
            .arg_if(stk.rgb_equalize, "-rgb_equal")
            .arg_if(stk.output_normalize, "-output_norm")
            .arg_if(stk.float32, "-32b")
            .opt("out", stk.output.trim());

        if stk.maximize_framing {
            cmd = cmd
                .arg("-maximize")
                .arg_if(stk.overlap_normalize, "-overlap_norm");
        }
        if stk.feather > 0 {
            cmd = cmd.opt("feather", stk.feather);
        }
        cmd = cmd.arg(stk.rejection_map.flag().unwrap_or_default());

        self.emit(cmd);
        self.blank();
    }

    fn post_processing(&mut self) {
        let cfg = self.cfg;
        let stk = &cfg.stacking;
        self.comment("--- Post-Processing ---");

        // Without an explicit name the interpreter writes `<sequence>_stacked`.
        let result = match stk.output.trim() {
            "" => format!("{}_stacked", stk.sequence.trim()),
            name => name.to_string(),
        };

        self.emit(Command::new("load").arg(&result));
        if stk.flip_bottom_up {
            self.emit(Command::new("mirrorx").arg("-bottomup"));
        }
        self.emit(Command::new("save").arg(format_args!("../{result}_{LIVETIME_TEMPLATE}")));
        self.cd("..");
        self.emit(Command::new("close"));
    }
}

/// The path when its toggle is on, otherwise nothing.
fn enabled_path(enabled: bool, path: &str) -> &str {
    if enabled {
        path.trim()
    } else {
        ""
    }
}
