/// Discrete per-frame input handed to the core by the front-end.

/// Every command the core understands.  Keys that map to none of these are
/// dropped at the boundary and never reach the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateUp,
    RotateDown,
    Fire,
    SwitchWeapon,
    Quit,
}

/// Held-key state for one frame.  `switch_weapon` is edge-triggered: the
/// front-end sets it only on the frame the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_up: bool,
    pub rotate_down: bool,
    pub fire: bool,
    pub switch_weapon: bool,
    pub quit: bool,
}

impl InputSnapshot {
    pub fn from_commands<I>(commands: I) -> InputSnapshot
    where
        I: IntoIterator<Item = Command>,
    {
        let mut snapshot = InputSnapshot::default();
        for command in commands {
            match command {
                Command::MoveLeft => snapshot.move_left = true,
                Command::MoveRight => snapshot.move_right = true,
                Command::RotateUp => snapshot.rotate_up = true,
                Command::RotateDown => snapshot.rotate_down = true,
                Command::Fire => snapshot.fire = true,
                Command::SwitchWeapon => snapshot.switch_weapon = true,
                Command::Quit => snapshot.quit = true,
            }
        }
        snapshot
    }

    /// Same snapshot with every control bit cleared; only `quit` survives.
    pub fn frozen(&self) -> InputSnapshot {
        InputSnapshot {
            quit: self.quit,
            ..InputSnapshot::default()
        }
    }
}
