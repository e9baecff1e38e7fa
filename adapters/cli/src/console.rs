//! Line-oriented terminal backend.

use std::{
    io::{BufRead, Write},
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use maze_escape_rendering::{ascii, FrameInput, Presentation, RenderingBackend, Scene};

/// Simulated time covered by one console frame.
pub(crate) const FRAME_DT: Duration = Duration::from_nanos(16_666_667);

/// Frames simulated by a movement command without an explicit count.
const DEFAULT_MOVE_FRAMES: u32 = 15;

/// Upper bound on frames simulated by a single movement command.
const MAX_MOVE_FRAMES: u32 = 600;

const HELP: &str = "commands: w/a/s/d [frames] move (uppercase sprints), look <dx> [dy], r reset, p print, q quit";

/// Backend that reads commands from `input` and writes the maze to `output`.
#[derive(Debug)]
pub(crate) struct ConsoleBackend<R, W> {
    input: R,
    output: W,
}

impl<R, W> ConsoleBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a backend over the provided streams.
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_scene(&mut self, scene: &Scene) -> AnyResult<()> {
        write!(self.output, "{}", scene.dump)?;
        let markers: Vec<String> = scene
            .markers
            .iter()
            .map(|marker| format!("{} {}", marker.kind.label(), marker.cell))
            .collect();
        writeln!(
            self.output,
            "{}x{} maze, {} wall segments; {}",
            scene.width,
            scene.height,
            scene.walls.len(),
            markers.join(", ")
        )?;
        writeln!(self.output, "{}", ascii::legend())?;
        Ok(())
    }

    fn report(&mut self, scene: &mut Scene) -> AnyResult<()> {
        for message in scene.messages.drain(..) {
            writeln!(self.output, "{message}")?;
        }
        if let (Some(camera), Some(cell)) = (scene.camera, scene.player_cell) {
            let front = camera.front();
            writeln!(
                self.output,
                "at ({:.2}, {:.2}) in cell {cell}, looking along ({:.2}, {:.2}, {:.2})",
                camera.eye.x, camera.eye.z, front.x, front.y, front.z
            )?;
        }
        Ok(())
    }
}

impl<R, W> RenderingBackend for ConsoleBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let mut scene = presentation.scene;
        writeln!(self.output, "{}", presentation.window_title)?;
        self.print_scene(&scene)?;
        writeln!(self.output, "{HELP}")?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush().context("failed to flush console output")?;

            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read console input")?;
            if read == 0 {
                break;
            }

            match parse_action(&line) {
                Some(ConsoleAction::Quit) => break,
                Some(ConsoleAction::Print) => self.print_scene(&scene)?,
                Some(ConsoleAction::Step { input, frames }) => {
                    for frame in 0..frames {
                        let input = if frame == 0 {
                            input
                        } else {
                            FrameInput {
                                yaw_delta: 0.0,
                                pitch_delta: 0.0,
                                reset: false,
                                ..input
                            }
                        };
                        update_scene(FRAME_DT, input, &mut scene);
                    }
                    self.report(&mut scene)?;
                }
                Some(ConsoleAction::Skip) => {}
                None => writeln!(self.output, "{HELP}")?,
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush().context("failed to flush console output")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ConsoleAction {
    Step { input: FrameInput, frames: u32 },
    Print,
    Quit,
    Skip,
}

fn parse_action(line: &str) -> Option<ConsoleAction> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Some(ConsoleAction::Skip);
    };

    let action = match verb {
        "q" | "quit" => ConsoleAction::Quit,
        "p" | "print" => ConsoleAction::Print,
        "r" | "reset" => ConsoleAction::Step {
            input: FrameInput {
                reset: true,
                ..FrameInput::default()
            },
            frames: 1,
        },
        "look" => {
            let yaw_delta = parse_delta(words.next()?)?;
            let pitch_delta = match words.next() {
                Some(value) => parse_delta(value)?,
                None => 0.0,
            };
            ConsoleAction::Step {
                input: FrameInput {
                    yaw_delta,
                    pitch_delta,
                    ..FrameInput::default()
                },
                frames: 1,
            }
        }
        _ => {
            let mut input = movement_input(verb)?;
            input.sprint = verb.chars().all(|c| c.is_ascii_uppercase());
            let frames = match words.next() {
                Some(value) => value.parse::<u32>().ok()?.min(MAX_MOVE_FRAMES),
                None => DEFAULT_MOVE_FRAMES,
            };
            ConsoleAction::Step { input, frames }
        }
    };

    if words.next().is_some() {
        return None;
    }
    Some(action)
}

fn parse_delta(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|delta| delta.is_finite())
}

fn movement_input(verb: &str) -> Option<FrameInput> {
    let mut input = FrameInput::default();
    match verb.to_ascii_lowercase().as_str() {
        "w" => input.forward = true,
        "s" => input.backward = true,
        "a" => input.left = true,
        "d" => input.right = true,
        _ => return None,
    }
    Some(input)
}
