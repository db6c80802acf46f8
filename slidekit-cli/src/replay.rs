//! Headless drag replay — a scripted host driving one mounted slider.
//!
//! Script tokens:
//! - `down:X` — pointer pressed at X (only grabs if X is on the handle)
//! - `move:X` — pointer moved to X
//! - `frame`  — display refresh
//! - `up` / `up:X` — pointer released (after moving to X)
//! - `resize:W` — track resized to width W, then a resize event

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use slidekit_core::{
    EventHub, FixedGeometry, HostEvent, MountedSlider, SharedGeometry, SliderSpec,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Down(f64),
    Move(f64),
    Frame,
    Up(Option<f64>),
    Resize(f64),
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Down(x) => write!(f, "down:{x}"),
            Step::Move(x) => write!(f, "move:{x}"),
            Step::Frame => write!(f, "frame"),
            Step::Up(Some(x)) => write!(f, "up:{x}"),
            Step::Up(None) => write!(f, "up"),
            Step::Resize(w) => write!(f, "resize:{w}"),
        }
    }
}

pub fn parse_step(token: &str) -> Result<Step> {
    let (verb, arg) = match token.split_once(':') {
        Some((verb, arg)) => (verb, Some(arg)),
        None => (token, None),
    };
    let number = |arg: Option<&str>| -> Result<f64> {
        let Some(raw) = arg else {
            bail!("'{token}' needs a number, e.g. {verb}:120");
        };
        let value: f64 = raw
            .parse()
            .with_context(|| format!("'{raw}' in '{token}' is not a number"))?;
        if !value.is_finite() {
            bail!("'{token}' needs a finite number");
        }
        Ok(value)
    };

    match verb {
        "down" => Ok(Step::Down(number(arg)?)),
        "move" => Ok(Step::Move(number(arg)?)),
        "frame" if arg.is_none() => Ok(Step::Frame),
        "up" => match arg {
            Some(_) => Ok(Step::Up(Some(number(arg)?))),
            None => Ok(Step::Up(None)),
        },
        "resize" => Ok(Step::Resize(number(arg)?)),
        _ => bail!("unknown script token '{token}' (expected down:X, move:X, frame, up[:X], resize:W)"),
    }
}

/// Parse tokens; each argument may itself hold several tokens separated by
/// commas or whitespace.
pub fn parse_script(args: &[String]) -> Result<Vec<Step>> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

/// A value reported to the owner, and what caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    /// `mount`, or the script token.
    pub cause: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub emitted: Vec<Emitted>,
    /// `down:X` tokens that missed the handle.
    pub missed: Vec<String>,
    pub final_value: f64,
    pub final_offset: f64,
}

/// Mount `spec` on a fresh hub and play `steps` against it. Reported values
/// are applied to the owner's spec and re-rendered, as a real owner would.
pub fn replay(spec: SliderSpec, geometry: FixedGeometry, steps: &[Step]) -> Replay {
    let hub = EventHub::new();
    let layout = SharedGeometry::new(geometry);
    let reported = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&reported);
    let slider = MountedSlider::mount(&hub, layout.clone(), spec.clone(), move |value| {
        log.borrow_mut().push(value);
    });

    let mut owner = spec;
    let mut emitted = Vec::new();
    let mut missed = Vec::new();
    let mut settle = |cause: &str, owner: &mut SliderSpec| {
        // Applying a value re-renders, which may report again.
        loop {
            let values: Vec<f64> = reported.borrow_mut().drain(..).collect();
            if values.is_empty() {
                break;
            }
            for value in values {
                owner.value = value;
                emitted.push(Emitted {
                    cause: cause.to_string(),
                    value,
                });
                slider.render(owner.clone());
            }
        }
    };
    settle("mount", &mut owner);

    for step in steps {
        let cause = step.to_string();
        match *step {
            Step::Down(x) => {
                let left = slider.handle_left();
                let width = layout.get().handle_width;
                if x >= left && x < left + width {
                    slider.pointer_down(x);
                } else {
                    tracing::info!(x, handle_left = left, "pointer-down missed the handle");
                    missed.push(cause.clone());
                }
            }
            Step::Move(x) => {
                hub.dispatch(&HostEvent::PointerMove { x });
            }
            Step::Frame => {
                hub.dispatch(&HostEvent::Frame);
            }
            Step::Up(x) => {
                if let Some(x) = x {
                    hub.dispatch(&HostEvent::PointerMove { x });
                }
                hub.dispatch(&HostEvent::PointerUp);
            }
            Step::Resize(width) => {
                let mut resized = layout.get();
                let left = resized.track.map_or(0.0, |t| t.left);
                resized = FixedGeometry::new(left, width, resized.handle_width);
                layout.set(resized);
                hub.dispatch(&HostEvent::Resize);
            }
        }
        settle(&cause, &mut owner);
    }

    Replay {
        emitted,
        missed,
        final_value: owner.value,
        final_offset: slider.offset(),
    }
}
