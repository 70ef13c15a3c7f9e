use crate::parser::Command;
use crate::session::State;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Path,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Self::Exit),
            "cd" => Some(Self::Cd),
            "path" => Some(Self::Path),
            _ => None,
        }
    }
}

/// What the session should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(thiserror::Error, Debug)]
pub enum BuiltinError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("cd: {}: {source}", path.display())]
    ChangeDir { path: PathBuf, source: io::Error },
}

/// Runs `command` if it names a builtin. `None` means it is not one and should be
/// resolved externally; a builtin that fails is still handled.
pub fn dispatch(command: &Command, state: &mut State) -> Option<Result<Flow, BuiltinError>> {
    let builtin = Builtin::from_name(command.program())?;
    let args = &command.args()[1..];
    tracing::debug!(?builtin, ?args, "builtin");

    Some(match builtin {
        Builtin::Exit => exit_builtin(args),
        Builtin::Cd => cd_builtin(args, state).map(|()| Flow::Continue),
        Builtin::Path => {
            state.bin_path.replace(args.iter().map(PathBuf::from).collect());
            Ok(Flow::Continue)
        }
    })
}

fn exit_builtin(args: &[String]) -> Result<Flow, BuiltinError> {
    if !args.is_empty() {
        return Err(BuiltinError::Usage("exit"));
    }

    Ok(Flow::Exit)
}

fn cd_builtin(args: &[String], state: &mut State) -> Result<(), BuiltinError> {
    let [target] = args else {
        return Err(BuiltinError::Usage("cd <dir>"));
    };

    let path = state.current_dir.join(target);
    let to_err = |source| BuiltinError::ChangeDir {
        path: path.clone(),
        source,
    };

    let resolved = fs::canonicalize(&path).map_err(to_err)?;
    if !fs::metadata(&resolved).map_err(to_err)?.is_dir() {
        return Err(to_err(io::Error::from(io::ErrorKind::NotADirectory)));
    }
    // stat through the directory fails unless we may search it
    fs::metadata(resolved.join(".")).map_err(to_err)?;

    tracing::debug!(dir = %resolved.display(), "working directory changed");
    state.current_dir = resolved;

    Ok(())
}
