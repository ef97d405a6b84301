//! Test doubles: a fixed terminfo database and a scripted terminal.

use crate::error::{MenuError, Result};
use crate::terminal::{CapabilityTable, InputEvent, MenuTerminal, TerminfoSource};
use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Serializes tests that touch process-wide terminal state: signal
/// dispositions, the wake pipe and the saved line discipline.
pub(crate) static TERMINAL_TEST_LOCK: Mutex<()> = Mutex::new(());

/// An xterm-256color capability set answered from memory.
pub(crate) struct StaticTerminfo {
    sequences: HashMap<String, String>,
    colors: i32,
    erase: Option<u8>,
    failing: Option<String>,
}

impl StaticTerminfo {
    pub(crate) fn xterm() -> Self {
        let mut sequences = HashMap::new();
        for n in 0..8 {
            sequences.insert(format!("setaf {n}"), format!("\x1b[3{n}m"));
            sequences.insert(format!("setab {n}"), format!("\x1b[4{n}m"));
        }
        let fixed = [
            ("bold", "\x1b[1m"),
            ("clear", "\x1b[H\x1b[2J"),
            ("cud1", "\n"),
            ("cuu1", "\x1b[A"),
            ("civis", "\x1b[?25l"),
            ("cnorm", "\x1b[?12l\x1b[?25h"),
            ("dl1", "\x1b[M"),
            ("kcud1", "\x1bOB"),
            ("kcuu1", "\x1bOA"),
            ("khome", "\x1bOH"),
            ("kend", "\x1bOF"),
            ("kpp", "\x1b[5~"),
            ("knp", "\x1b[6~"),
            ("smkx", "\x1b[?1h\x1b="),
            ("rmkx", "\x1b[?1l\x1b>"),
            ("sitm", "\x1b[3m"),
            ("sgr0", "\x1b(B\x1b[m"),
            ("smso", "\x1b[7m"),
            ("smul", "\x1b[4m"),
        ];
        for (capname, sequence) in fixed {
            sequences.insert(capname.to_string(), sequence.to_string());
        }
        Self {
            sequences,
            colors: 256,
            erase: Some(0x7f),
            failing: None,
        }
    }

    pub(crate) fn with_colors(mut self, colors: i32) -> Self {
        self.colors = colors;
        self
    }

    /// Report `capname` as unsupported.
    pub(crate) fn without(mut self, capname: &str) -> Self {
        self.sequences.remove(capname);
        self
    }

    pub(crate) fn with_erase(mut self, erase: u8) -> Self {
        self.erase = Some(erase);
        self
    }

    /// Make the lookup of `capname` fail outright.
    pub(crate) fn failing(mut self, capname: &str) -> Self {
        self.failing = Some(capname.to_string());
        self
    }
}

impl TerminfoSource for StaticTerminfo {
    fn query(&self, capname: &str) -> Result<String> {
        if self.failing.as_deref() == Some(capname) {
            return Err(MenuError::CapabilityQuery {
                capname: capname.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        if capname == "colors" {
            return Ok(self.colors.to_string());
        }
        Ok(self.sequences.get(capname).cloned().unwrap_or_default())
    }

    fn erase_char(&self) -> Option<u8> {
        self.erase
    }
}

pub(crate) fn xterm_table() -> Arc<CapabilityTable> {
    Arc::new(CapabilityTable::build(&StaticTerminfo::xterm()).expect("xterm table"))
}

enum Scripted {
    Event(InputEvent),
    ResizeTo(usize, usize),
}

/// A terminal that replays canned input and records everything written.
///
/// Once the script runs out it reports an interrupt, so a forgotten accept
/// key ends the menu instead of hanging the test.
pub(crate) struct ScriptedTerminal {
    script: VecDeque<Scripted>,
    size: (usize, usize),
    pub(crate) output: Vec<u8>,
}

impl ScriptedTerminal {
    pub(crate) fn new(cols: usize, rows: usize) -> Self {
        Self {
            script: VecDeque::new(),
            size: (cols, rows),
            output: Vec::new(),
        }
    }

    pub(crate) fn key(mut self, bytes: &[u8]) -> Self {
        self.script
            .push_back(Scripted::Event(InputEvent::Bytes(bytes.to_vec())));
        self
    }

    /// Queue each character of `text` as its own key press.
    pub(crate) fn typed(mut self, text: &str) -> Self {
        for ch in text.chars() {
            self = self.key(ch.to_string().as_bytes());
        }
        self
    }

    pub(crate) fn interrupt(mut self) -> Self {
        self.script.push_back(Scripted::Event(InputEvent::Interrupt));
        self
    }

    pub(crate) fn resize(mut self, cols: usize, rows: usize) -> Self {
        self.script.push_back(Scripted::ResizeTo(cols, rows));
        self
    }

    pub(crate) fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl MenuTerminal for ScriptedTerminal {
    fn read_input(&mut self) -> io::Result<InputEvent> {
        match self.script.pop_front() {
            Some(Scripted::Event(event)) => Ok(event),
            Some(Scripted::ResizeTo(cols, rows)) => {
                self.size = (cols, rows);
                Ok(InputEvent::Resize)
            }
            None => Ok(InputEvent::Interrupt),
        }
    }

    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}
