//! Interactive terminal session: scrollback, prompt echo, and input history.

use std::rc::Rc;

use platform_host::{KeyValueStore, MemoryKeyValueStore};

use crate::{
    commands::{CommandOutput, CommandRegistry, ShellEnv},
    config::TerminalConfig,
    vfs::VirtualFileTable,
};

/// First scrollback line of a new session.
pub const WELCOME_BANNER: &str =
    "Bienvenido a la terminal emulada. escribe \"help\" para ver comandos.";

/// One terminal window's state.
pub struct TerminalSession {
    config: TerminalConfig,
    registry: CommandRegistry,
    vfs: VirtualFileTable,
    store: Rc<dyn KeyValueStore>,
    scrollback: Vec<String>,
    history: Vec<String>,
    history_index: usize,
}

impl TerminalSession {
    pub fn new(config: TerminalConfig, store: Rc<dyn KeyValueStore>) -> Self {
        let vfs = VirtualFileTable::seeded(&config);
        let mut session = Self {
            config,
            registry: CommandRegistry::with_builtins(),
            vfs,
            store,
            scrollback: Vec::new(),
            history: Vec::new(),
            history_index: 0,
        };
        session.push_line(WELCOME_BANNER.to_string());
        session
    }

    /// Session whose `save`/`load` go to the browser's durable storage, or memory off-browser.
    pub fn with_browser_storage(config: TerminalConfig) -> Self {
        Self::new(config, platform_host_web::durable_store())
    }

    /// Session backed by a private in-memory store.
    pub fn in_memory() -> Self {
        Self::new(
            TerminalConfig::default(),
            Rc::new(MemoryKeyValueStore::default()),
        )
    }

    pub fn lines(&self) -> &[String] {
        &self.scrollback
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn vfs(&self) -> &VirtualFileTable {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut VirtualFileTable {
        &mut self.vfs
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Handles an entered line: records it, echoes it after the prompt, and runs it trimmed.
    pub fn submit(&mut self, raw: &str) {
        self.history.push(raw.to_string());
        self.history_index = self.history.len();
        self.push_line(format!("{}{raw}", self.config.prompt));

        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        let mut env = ShellEnv {
            vfs: &mut self.vfs,
            store: self.store.as_ref(),
            config: &self.config,
        };
        match self.registry.execute(line, &mut env) {
            CommandOutput::Lines(lines) => {
                for line in lines {
                    self.push_line(line);
                }
            }
            CommandOutput::Clear => self.scrollback.clear(),
        }
    }

    /// Steps back through history. `None` leaves the input untouched.
    pub fn history_up(&mut self) -> Option<&str> {
        if self.history.is_empty() || self.history_index == 0 {
            return None;
        }
        self.history_index -= 1;
        self.history.get(self.history_index).map(String::as_str)
    }

    /// Steps forward through history, stopping at the newest entry.
    pub fn history_down(&mut self) -> Option<&str> {
        if self.history.is_empty() || self.history_index + 1 >= self.history.len() {
            return None;
        }
        self.history_index += 1;
        self.history.get(self.history_index).map(String::as_str)
    }

    fn push_line(&mut self, line: String) {
        self.scrollback.push(line);
        if self.scrollback.len() > self.config.max_scrollback {
            let overflow = self.scrollback.len() - self.config.max_scrollback;
            self.scrollback.drain(0..overflow);
        }
    }
}

impl std::fmt::Debug for TerminalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("config", &self.config)
            .field("files", &self.vfs.len())
            .field("scrollback", &self.scrollback.len())
            .field("history_index", &self.history_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session_with_store() -> (TerminalSession, MemoryKeyValueStore) {
        let store = MemoryKeyValueStore::default();
        let session = TerminalSession::new(TerminalConfig::default(), Rc::new(store.clone()));
        (session, store)
    }

    /// Runs `line` and returns only the output it produced, without the prompt echo.
    fn run(session: &mut TerminalSession, line: &str) -> Vec<String> {
        let before = session.lines().len();
        session.submit(line);
        session.lines()[before + 1..].to_vec()
    }

    #[test]
    fn starts_with_banner() {
        let session = TerminalSession::in_memory();
        assert_eq!(session.lines(), [WELCOME_BANNER.to_string()]);
    }

    #[test]
    fn submit_echoes_prompt_with_raw_input() {
        let mut session = TerminalSession::in_memory();
        session.submit("  echo hola  ");
        assert_eq!(
            session.lines()[1..],
            ["user@webos:~$   echo hola  ".to_string(), "hola".to_string()]
        );
    }

    #[test]
    fn blank_line_only_echoes() {
        let mut session = TerminalSession::in_memory();
        session.submit("   ");
        assert_eq!(session.lines().len(), 2);
        assert_eq!(session.history(), ["   ".to_string()]);
    }

    #[test]
    fn touch_cat_rm_cat() {
        let mut session = TerminalSession::in_memory();
        assert_eq!(
            run(&mut session, "touch /home/user/x.txt"),
            ["Archivo creado: /home/user/x.txt"]
        );
        assert_eq!(run(&mut session, "cat /home/user/x.txt"), [""]);
        assert_eq!(
            run(&mut session, "rm /home/user/x.txt"),
            ["Eliminado /home/user/x.txt"]
        );
        assert_eq!(
            run(&mut session, "cat /home/user/x.txt"),
            ["cat: archivo no encontrado: /home/user/x.txt"]
        );
        assert_eq!(run(&mut session, "rm x.txt"), ["rm: archivo no existe"]);
    }

    #[test]
    fn relative_paths_resolve_under_home() {
        let mut session = TerminalSession::in_memory();
        run(&mut session, "touch notas.txt");
        assert!(session.vfs().contains("/home/user/notas.txt"));
        assert_eq!(
            run(&mut session, "cat readme.txt"),
            ["Bienvenido a tu OS Web\n"]
        );
        assert_eq!(
            run(&mut session, "cat"),
            ["cat: archivo no encontrado: /home/user"]
        );
    }

    #[test]
    fn touch_without_path_uses_timestamped_name() {
        let mut session = TerminalSession::in_memory();
        let output = run(&mut session, "touch");
        let created = output[0]
            .strip_prefix("Archivo creado: ")
            .expect("created message");
        assert!(created.starts_with("/home/user/nuevo"));
        assert!(created.ends_with(".txt"));
        assert!(session.vfs().contains(created));
    }

    #[test]
    fn ls_lists_names_or_empty_marker() {
        let mut session = TerminalSession::in_memory();
        run(&mut session, "touch a.txt");
        assert_eq!(run(&mut session, "ls"), ["a.txt  readme.txt"]);
        assert_eq!(run(&mut session, "ls /nada"), ["(vacío)"]);
    }

    #[test]
    fn fixed_messages() {
        let mut session = TerminalSession::in_memory();
        assert_eq!(
            run(&mut session, "help"),
            ["Comandos: help, echo, date, ls, cat, touch, rm, clear, runjs, save, load, ssh"]
        );
        assert_eq!(
            run(&mut session, "ssh user@host"),
            ["ssh: esta acción requiere un backend. Ver opciones: WebContainer o WebSocket+Docker."]
        );
        assert_eq!(
            run(&mut session, "python"),
            ["comando no encontrado: python"]
        );
        assert_eq!(run(&mut session, "date").len(), 1);
    }

    #[test]
    fn runjs_evaluates_arithmetic_only() {
        let mut session = TerminalSession::in_memory();
        assert_eq!(run(&mut session, "runjs (2 + 3) * 4"), ["20"]);
        assert_eq!(run(&mut session, "runjs 1 / 0"), ["Infinity"]);
        assert_eq!(run(&mut session, "runjs"), ["undefined"]);
        assert_eq!(
            run(&mut session, "runjs document.cookie"),
            ["Error JS: Unexpected token 'd'"]
        );
    }

    #[test]
    fn runjs_reports_deeply_nested_input() {
        let mut session = TerminalSession::in_memory();
        let source = format!("runjs {}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(
            run(&mut session, &source),
            ["Error JS: Expression nested too deeply"]
        );
    }

    #[test]
    fn clear_wipes_scrollback_including_echo() {
        let mut session = TerminalSession::in_memory();
        session.submit("echo uno");
        session.submit("clear");
        assert!(session.lines().is_empty());
        session.submit("echo dos");
        assert_eq!(session.lines().len(), 2);
    }

    #[test]
    fn save_then_load_round_trips_through_store() {
        let (mut session, store) = session_with_store();
        run(&mut session, "touch /tmp/a");
        assert_eq!(
            run(&mut session, "save copia"),
            ["FS guardado en localStorage key=copia"]
        );
        assert!(store.contains("copia"));

        run(&mut session, "rm /tmp/a");
        assert_eq!(run(&mut session, "load copia"), ["FS cargado desde copia"]);
        assert!(session.vfs().contains("/tmp/a"));

        assert_eq!(run(&mut session, "load otra"), ["No existe key otra"]);
        assert_eq!(run(&mut session, "save"), ["FS guardado en localStorage key=fs"]);
        assert!(store.contains("fs"));
    }

    #[test]
    fn load_rejects_malformed_data_without_touching_files() {
        let (mut session, store) = session_with_store();
        store.set_item("roto", "{not json").expect("seed");
        let before = session.vfs().clone();
        assert_eq!(run(&mut session, "load roto"), ["load: datos inválidos en roto"]);
        assert_eq!(session.vfs(), &before);
    }

    #[test]
    fn history_navigation() {
        let mut session = TerminalSession::in_memory();
        assert_eq!(session.history_up(), None);
        for line in ["uno", "dos", "tres"] {
            session.submit(line);
        }

        assert_eq!(session.history_up(), Some("tres"));
        assert_eq!(session.history_up(), Some("dos"));
        assert_eq!(session.history_up(), Some("uno"));
        assert_eq!(session.history_up(), None);
        assert_eq!(session.history_down(), Some("dos"));
        assert_eq!(session.history_down(), Some("tres"));
        assert_eq!(session.history_down(), None);

        session.submit("cuatro");
        assert_eq!(session.history_down(), None);
        assert_eq!(session.history_up(), Some("cuatro"));
    }

    #[test]
    fn scrollback_is_bounded() {
        let config = TerminalConfig {
            max_scrollback: 3,
            ..TerminalConfig::default()
        };
        let mut session = TerminalSession::new(config, Rc::new(MemoryKeyValueStore::default()));
        session.submit("echo a");
        session.submit("echo b");
        assert_eq!(
            session.lines(),
            ["a".to_string(), "user@webos:~$ echo b".to_string(), "b".to_string()]
        );
    }
}
