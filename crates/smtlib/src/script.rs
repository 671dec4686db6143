use crate::command::Command;
use crate::sort::Sort;
use crate::term::Term;

/// An SMT-LIB script: a sequence of commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    commands: Vec<Command>,
}

impl Script {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = Command>) {
        self.commands.extend(cmds);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Constants declared by the script, in declaration order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, Sort)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            Command::DeclareConst(name, sort) => Some((name.as_str(), *sort)),
            _ => None,
        })
    }

    /// Asserted terms, in assertion order.
    pub fn assertions(&self) -> impl Iterator<Item = &Term> {
        self.commands.iter().filter_map(|cmd| match cmd {
            Command::Assert(term) => Some(term),
            _ => None,
        })
    }

    /// Whether the script already contains `cmd`.
    pub fn contains(&self, cmd: &Command) -> bool {
        self.commands.contains(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_empty_script() {
        let script = Script::new();
        assert!(script.is_empty());
        assert_eq!(script.len(), 0);
        assert_eq!(script, Script::default());
    }

    #[test]
    fn push_preserves_order() {
        let mut script = Script::new();
        script.push(Command::DeclareConst("x".to_string(), Sort::Int));
        script.push(Command::Assert(Term::var("x").gt(Term::int(0))));
        script.extend(vec![Command::CheckSat, Command::GetModel]);

        let cmds = script.commands();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(&cmds[0], Command::DeclareConst(n, Sort::Int) if n == "x"));
        assert!(matches!(&cmds[1], Command::Assert(_)));
        assert_eq!(cmds[2], Command::CheckSat);
        assert_eq!(cmds[3], Command::GetModel);
    }

    #[test]
    fn declarations_and_assertions_are_filtered() {
        let script = Script::with_commands(vec![
            Command::DeclareConst("p".to_string(), Sort::Int),
            Command::Comment("heap".to_string()),
            Command::DeclareConst("q".to_string(), Sort::Int),
            Command::Assert(Term::var("p").not_equals(Term::var("q"))),
            Command::CheckSat,
        ]);

        let decls: Vec<_> = script.declarations().collect();
        assert_eq!(decls, vec![("p", Sort::Int), ("q", Sort::Int)]);
        assert_eq!(script.assertions().count(), 1);
        assert!(script.contains(&Command::CheckSat));
        assert!(!script.contains(&Command::GetModel));
    }

    #[test]
    fn into_commands_returns_vec() {
        let script = Script::with_commands(vec![Command::CheckSat, Command::Exit]);
        assert_eq!(script.into_commands(), vec![Command::CheckSat, Command::Exit]);
    }
}
