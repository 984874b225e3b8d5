//! Scene state machine: title, stage, high scores
//!
//! [`App`] is what the platform loop drives. Each frame it samples the
//! keys, advances whichever scene is active, forwards the stage's queued
//! events to the audio and score collaborators, and switches scenes when
//! one asks to. A run that makes the leaderboard opens the high score
//! scene in name entry; the table shows once the name is committed.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::Audio;
use crate::consts::{FPS, SCREEN_HEIGHT};
use crate::highscores::{HighScores, ScoreRecorder};
use crate::platform::{Key, KeyState};
use crate::renderer::{
    Canvas, SpriteLibrary, StageSprites, draw_high_scores, draw_name_input, draw_stage,
    draw_title,
};
use crate::sim::backdrop::Backdrop;
use crate::sim::{Stage, StageEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Frames the title stays up before the leaderboard takes over
pub const TITLE_TIMEOUT: i32 = FPS * 5;
/// The timeout runs this far negative before switching
const TITLE_OVERRUN: i32 = -80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleScreen {
    /// Counts down each frame; negative values are the post-timeout overrun
    pub timeout: i32,
    /// Rows of title art revealed so far
    pub reveal: i32,
}

impl Default for TitleScreen {
    fn default() -> Self {
        Self {
            timeout: TITLE_TIMEOUT,
            reveal: 0,
        }
    }
}

impl TitleScreen {
    /// Advance one frame. Returns true once the title has timed out.
    fn advance(&mut self) -> bool {
        if self.reveal < SCREEN_HEIGHT {
            self.reveal += 1;
        }
        self.timeout -= 1;
        self.timeout <= TITLE_OVERRUN
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighScoreScreen {
    /// Typing a name into the table entry at `index`
    EnteringName { index: usize, cursor_blink: i32 },
    #[default]
    Table,
}

impl HighScoreScreen {
    fn for_entry(naming: Option<usize>) -> Self {
        match naming {
            Some(index) => HighScoreScreen::EnteringName {
                index,
                cursor_blink: 0,
            },
            None => HighScoreScreen::Table,
        }
    }

    /// Cursor is lit for the first half of each second
    pub fn cursor_visible(&self) -> bool {
        matches!(self, HighScoreScreen::EnteringName { cursor_blink, .. } if *cursor_blink < FPS / 2)
    }
}

/// The active scene
#[derive(Debug, Clone)]
pub enum Scene {
    Title(TitleScreen),
    Playing(Box<Stage>),
    HighScores(HighScoreScreen),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Title(_) => "title",
            Scene::Playing(_) => "stage",
            Scene::HighScores(_) => "high scores",
        }
    }
}

/// Requested scene change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Play,
    /// Show the table, first naming the entry at this index if any
    HighScores { naming: Option<usize> },
}

/// Forward stage events to the collaborators.
///
/// Returns the final score if the batch contained the end of the episode.
pub fn dispatch_events(
    events: impl IntoIterator<Item = StageEvent>,
    audio: &mut impl Audio,
    recorder: &mut impl ScoreRecorder,
) -> Option<u32> {
    let mut ended = None;
    for event in events {
        match event {
            StageEvent::Sound { effect, channel } => audio.play(effect, channel),
            StageEvent::PlayerDied => log::debug!("player died"),
            StageEvent::EpisodeEnded { score } => {
                recorder.record_score(score);
                ended = Some(score);
            }
        }
    }
    ended
}

/// Top-level application state
#[derive(Debug, Clone)]
pub struct App {
    pub scene: Scene,
    pub tuning: Tuning,
    pub sprites: StageSprites,
    pub high_scores: HighScores,
    /// Backdrop behind the menus; stages carry their own
    pub backdrop: Backdrop,
    /// Episodes started so far; offsets each stage's seed
    pub episodes: u64,
    /// Fire must be released between scene changes
    fire_armed: bool,
    /// Backspace deletes once per press
    backspace_held: bool,
}

impl App {
    pub fn new(library: &mut impl SpriteLibrary, tuning: Tuning) -> Self {
        let sprites = StageSprites::load(library);
        let backdrop = Backdrop::new(&mut Pcg32::seed_from_u64(tuning.seed));
        log::info!("App ready (seed {:#x}, {:?})", tuning.seed, tuning.reward_mode);
        Self {
            scene: Scene::Title(TitleScreen::default()),
            tuning,
            sprites,
            high_scores: HighScores::new(),
            backdrop,
            episodes: 0,
            fire_armed: true,
            backspace_held: false,
        }
    }

    /// The running stage, if any
    pub fn stage(&self) -> Option<&Stage> {
        match &self.scene {
            Scene::Playing(stage) => Some(stage.as_ref()),
            _ => None,
        }
    }

    pub fn stage_mut(&mut self) -> Option<&mut Stage> {
        match &mut self.scene {
            Scene::Playing(stage) => Some(stage.as_mut()),
            _ => None,
        }
    }

    /// Advance the active scene by one frame
    pub fn update(&mut self, keys: &impl KeyState, audio: &mut impl Audio) {
        let input = TickInput::from_keys(keys);
        if !input.fire {
            self.fire_armed = true;
        }
        let fire = input.fire && self.fire_armed;
        let backspace = keys.is_key_held(Key::Backspace) && !self.backspace_held;
        self.backspace_held = keys.is_key_held(Key::Backspace);

        let next = match &mut self.scene {
            Scene::Title(title) => {
                self.backdrop.advance();
                let timed_out = title.advance();
                if fire {
                    Some(Next::Play)
                } else if timed_out {
                    Some(Next::HighScores { naming: None })
                } else {
                    None
                }
            }
            Scene::Playing(stage) => {
                tick(stage, &input);
                let ended = dispatch_events(stage.drain_events(), audio, &mut self.high_scores);
                ended.map(|_| Next::HighScores {
                    naming: self.high_scores.recent().map(|(index, _)| index),
                })
            }
            Scene::HighScores(screen) => {
                self.backdrop.advance();
                match screen {
                    HighScoreScreen::EnteringName {
                        index,
                        cursor_blink,
                    } => {
                        *cursor_blink = (*cursor_blink + 1) % FPS;
                        let committed = match self.high_scores.entries.get_mut(*index) {
                            Some(entry) => {
                                entry.type_text(keys.typed_text());
                                if backspace {
                                    entry.backspace();
                                }
                                let done = keys.is_key_held(Key::Return);
                                if done {
                                    entry.commit_name();
                                    log::info!("{} entered for {}", entry.name, entry.score);
                                }
                                done
                            }
                            None => true,
                        };
                        if committed {
                            *screen = HighScoreScreen::Table;
                        }
                        None
                    }
                    HighScoreScreen::Table => fire.then_some(Next::Play),
                }
            }
        };

        if let Some(next) = next {
            self.enter(next);
        }
    }

    fn enter(&mut self, next: Next) {
        self.fire_armed = false;
        self.scene = match next {
            Next::Play => {
                let seed = self.tuning.seed.wrapping_add(self.episodes);
                self.episodes += 1;
                let mut stage = Stage::new(self.tuning.clone().with_seed(seed), self.sprites);
                stage.set_best_score(self.high_scores.top_score().unwrap_or(0));
                Scene::Playing(Box::new(stage))
            }
            Next::HighScores { naming } => Scene::HighScores(HighScoreScreen::for_entry(naming)),
        };
        log::info!("Entering {} scene", self.scene.name());
    }

    /// Draw the active scene
    pub fn render(&self, canvas: &mut impl Canvas) {
        match &self.scene {
            Scene::Title(title) => draw_title(
                canvas,
                &self.sprites,
                &self.backdrop,
                title.reveal,
                title.timeout,
            ),
            Scene::Playing(stage) => draw_stage(canvas, stage),
            Scene::HighScores(screen @ HighScoreScreen::EnteringName { index, .. }) => {
                let name = self
                    .high_scores
                    .entries
                    .get(*index)
                    .map_or("", |entry| entry.name.as_str());
                draw_name_input(
                    canvas,
                    &self.sprites,
                    &self.backdrop,
                    name,
                    screen.cursor_visible(),
                )
            }
            Scene::HighScores(HighScoreScreen::Table) => {
                draw_high_scores(canvas, &self.sprites, &self.backdrop, &self.high_scores)
            }
        }
    }
}
