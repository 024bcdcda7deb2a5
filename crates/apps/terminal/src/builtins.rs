//! Built-in terminal commands.

use platform_host::{local_datetime_string, save_json_with, unix_time_ms_now};

use crate::{
    commands::{Command, CommandOutput, ShellEnv, ShellError},
    expr::{evaluate, format_js_number},
    vfs::VirtualFileTable,
};

pub(crate) fn all() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(Help),
        Box::new(Echo),
        Box::new(Date),
        Box::new(Ls),
        Box::new(Cat),
        Box::new(Touch),
        Box::new(Rm),
        Box::new(Clear),
        Box::new(RunJs),
        Box::new(Save),
        Box::new(Load),
        Box::new(Ssh),
    ]
}

fn resolve(env: &ShellEnv<'_>, input: Option<&&str>) -> String {
    VirtualFileTable::resolve_path(&env.config.home_dir, input.copied().unwrap_or(""))
}

fn export_key<'a>(env: &'a ShellEnv<'_>, args: &[&'a str]) -> &'a str {
    args.first()
        .copied()
        .unwrap_or(env.config.default_export_key.as_str())
}

struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn summary(&self) -> &str {
        "list commands"
    }

    fn execute(
        &self,
        _args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        Ok(CommandOutput::line(
            "Comandos: help, echo, date, ls, cat, touch, rm, clear, runjs, save, load, ssh",
        ))
    }
}

struct Echo;

impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn summary(&self) -> &str {
        "print arguments"
    }

    fn execute(
        &self,
        args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        Ok(CommandOutput::line(args.join(" ")))
    }
}

struct Date;

impl Command for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn summary(&self) -> &str {
        "print local date and time"
    }

    fn execute(
        &self,
        _args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        Ok(CommandOutput::line(local_datetime_string()))
    }
}

struct Ls;

impl Command for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn summary(&self) -> &str {
        "list files under a path prefix"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let prefix = args.first().copied().unwrap_or(env.config.home_dir.as_str());
        let entries = env.vfs.list(prefix);
        if entries.is_empty() {
            Ok(CommandOutput::line("(vacío)"))
        } else {
            Ok(CommandOutput::line(entries.join("  ")))
        }
    }
}

struct Cat;

impl Command for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn summary(&self) -> &str {
        "print a file"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let path = resolve(env, args.first());
        Ok(match env.vfs.read(&path) {
            Some(content) => CommandOutput::line(content),
            None => CommandOutput::line(format!("cat: archivo no encontrado: {path}")),
        })
    }
}

struct Touch;

impl Command for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn summary(&self) -> &str {
        "create an empty file"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let path = match args.first() {
            Some(input) => VirtualFileTable::resolve_path(&env.config.home_dir, input),
            None => format!("{}/nuevo{}.txt", env.config.home_dir, unix_time_ms_now()),
        };
        env.vfs.touch(&path);
        Ok(CommandOutput::line(format!("Archivo creado: {path}")))
    }
}

struct Rm;

impl Command for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn summary(&self) -> &str {
        "delete a file"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let path = resolve(env, args.first());
        Ok(match env.vfs.remove(&path) {
            Some(_) => CommandOutput::line(format!("Eliminado {path}")),
            None => CommandOutput::line("rm: archivo no existe"),
        })
    }
}

struct Clear;

impl Command for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn summary(&self) -> &str {
        "clear the screen"
    }

    fn execute(
        &self,
        _args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        Ok(CommandOutput::Clear)
    }
}

struct RunJs;

impl Command for RunJs {
    fn name(&self) -> &str {
        "runjs"
    }

    fn summary(&self) -> &str {
        "evaluate an arithmetic expression"
    }

    fn execute(
        &self,
        args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let source = args.join(" ");
        Ok(CommandOutput::line(match evaluate(&source) {
            Ok(Some(value)) => format_js_number(value),
            Ok(None) => "undefined".to_string(),
            Err(err) => format!("Error JS: {err}"),
        }))
    }
}

struct Save;

impl Command for Save {
    fn name(&self) -> &str {
        "save"
    }

    fn summary(&self) -> &str {
        "store the file table"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let key = export_key(env, args);
        save_json_with(env.store, key, &*env.vfs).map_err(|source| ShellError::Storage {
            command: "save",
            source,
        })?;
        Ok(CommandOutput::line(format!(
            "FS guardado en localStorage key={key}"
        )))
    }
}

struct Load;

impl Command for Load {
    fn name(&self) -> &str {
        "load"
    }

    fn summary(&self) -> &str {
        "merge a stored file table"
    }

    fn execute(
        &self,
        args: &[&str],
        env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        let key = export_key(env, args).to_string();
        let stored = env
            .store
            .get_item(&key)
            .map_err(|source| ShellError::Storage {
                command: "load",
                source,
            })?;
        let Some(raw) = stored.filter(|raw| !raw.is_empty()) else {
            return Ok(CommandOutput::line(format!("No existe key {key}")));
        };
        Ok(match env.vfs.merge_json(&raw) {
            Ok(_) => CommandOutput::line(format!("FS cargado desde {key}")),
            Err(err) => {
                log::warn!("ignoring malformed file table under `{key}`: {err}");
                CommandOutput::line(format!("load: datos inválidos en {key}"))
            }
        })
    }
}

struct Ssh;

impl Command for Ssh {
    fn name(&self) -> &str {
        "ssh"
    }

    fn summary(&self) -> &str {
        "remote shell (needs a backend)"
    }

    fn execute(
        &self,
        _args: &[&str],
        _env: &mut ShellEnv<'_>,
    ) -> Result<CommandOutput, ShellError> {
        Ok(CommandOutput::line(
            "ssh: esta acción requiere un backend. Ver opciones: WebContainer o WebSocket+Docker.",
        ))
    }
}
