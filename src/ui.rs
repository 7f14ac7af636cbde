//! Screen flow and timed sequences
//!
//! Pure state for the non-game screens. Timed sequences (loading steps, the
//! tip reel) hold absolute deadlines and are polled from the frame loop, so
//! navigating away simply drops them; nothing fires later.

/// The screens the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Tips,
    Menu,
    LevelSelect,
    Game,
    GameOver,
}

impl Screen {
    /// DOM element id of the screen container
    pub fn element_id(self) -> &'static str {
        match self {
            Screen::Loading => "loading-screen",
            Screen::Tips => "tip-screen",
            Screen::Menu => "menu-screen",
            Screen::LevelSelect => "level-select-screen",
            Screen::Game => "game-screen",
            Screen::GameOver => "game-over-screen",
        }
    }

    pub const ALL: [Screen; 6] = [
        Screen::Loading,
        Screen::Tips,
        Screen::Menu,
        Screen::LevelSelect,
        Screen::Game,
        Screen::GameOver,
    ];
}

/// Staged loading messages and their progress-bar percentage
pub const LOADING_STEPS: [(&str, u32); 5] = [
    ("Loading images...", 20),
    ("Preparing the game...", 40),
    ("Loading levels...", 60),
    ("Warming up the hearts...", 80),
    ("Ready! Starting...", 100),
];

/// Milliseconds between loading steps
pub const LOADING_STEP_MS: f64 = 800.0;

/// Rotating gameplay tips shown before the menu
pub const TIPS: [&str; 3] = [
    "Cupid! The love potion spilled all over town!",
    "Grab your anti-love arrows and get down there.",
    "Shoot the pink and violet hearts. The red ones are not infected!",
];

/// Milliseconds each tip stays up
pub const TIP_MS: f64 = 3000.0;
/// How many tips are shown before the menu appears
pub const TIP_SHOW_COUNT: u32 = 4;

/// Poll result for a timed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep<T> {
    /// Nothing due yet
    Waiting,
    /// A new item to display
    Show(T),
    /// Sequence finished; move to the next screen
    Done,
}

/// Loading-screen step sequencer
#[derive(Debug)]
pub struct LoadingSequence {
    step: usize,
    next_due_ms: f64,
}

impl LoadingSequence {
    pub fn new(now_ms: f64) -> Self {
        Self {
            step: 0,
            next_due_ms: now_ms,
        }
    }

    pub fn poll(&mut self, now_ms: f64) -> SequenceStep<(&'static str, u32)> {
        if now_ms < self.next_due_ms {
            return SequenceStep::Waiting;
        }
        match LOADING_STEPS.get(self.step) {
            Some(&step) => {
                self.step += 1;
                self.next_due_ms += LOADING_STEP_MS;
                SequenceStep::Show(step)
            }
            None => SequenceStep::Done,
        }
    }
}

/// Tip reel: cycles through `TIPS`, showing `TIP_SHOW_COUNT` in total.
///
/// The cursor survives across visits so returning players see fresh tips.
#[derive(Debug)]
pub struct TipReel {
    cursor: usize,
    shown: u32,
    next_due_ms: f64,
}

impl TipReel {
    pub fn new(now_ms: f64, cursor: usize) -> Self {
        Self {
            cursor: cursor % TIPS.len(),
            shown: 0,
            next_due_ms: now_ms,
        }
    }

    /// Where the reel cursor ended up, for the next visit
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn poll(&mut self, now_ms: f64) -> SequenceStep<&'static str> {
        if self.shown >= TIP_SHOW_COUNT {
            return SequenceStep::Done;
        }
        if now_ms < self.next_due_ms {
            return SequenceStep::Waiting;
        }
        let tip = TIPS[self.cursor];
        self.cursor = (self.cursor + 1) % TIPS.len();
        self.shown += 1;
        self.next_due_ms = now_ms + TIP_MS;
        SequenceStep::Show(tip)
    }
}

/// Game-over headline for a final score
pub fn result_title(score: i32) -> &'static str {
    if score >= 300 {
        "Incredible! 💫"
    } else if score >= 200 {
        "Great run! ⭐"
    } else if score >= 100 {
        "Nice shooting! 👍"
    } else {
        "Give it another try! 💪"
    }
}
