//! Built-in verification scenarios.
//!
//! Each scenario encodes a small imperative program into a [`Session`]:
//! variables become registry terms, `malloc` sites become object addresses,
//! pointer writes and reads go through the symbolic store, and branches are
//! asserted as implications. The program returns its violation condition,
//! the negation of the program's final `assert`, so an `unsat` final check
//! means the assertion holds on every execution.

use std::time::Instant;

use symem_memory::{CheckStatus, MemoryError, ModelReport, Session};
use symem_smtlib::term::Term;

/// A named program with its expected final check status.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub title: &'static str,
    /// Expected status once the violation condition is asserted.
    pub expected: Expected,
    program: fn(&mut Session) -> Term,
}

/// Expected final status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Sat,
    Unsat,
}

impl Expected {
    pub fn matches(self, status: &CheckStatus) -> bool {
        matches!(
            (self, status),
            (Expected::Sat, CheckStatus::Sat) | (Expected::Unsat, CheckStatus::Unsat)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Expected::Sat => "sat",
            Expected::Unsat => "unsat",
        }
    }
}

/// What running one scenario produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    /// Status of the program constraints alone.
    pub setup: CheckStatus,
    /// Variable values when the program constraints are satisfiable.
    pub report: Option<ModelReport>,
    /// Status after asserting the violation condition.
    pub status: CheckStatus,
    /// The final script, when requested.
    pub script: Option<String>,
    pub duration_ms: u64,
}

impl Scenario {
    /// Run on `session`, which is reset first.
    ///
    /// Checks the program constraints and captures the model report, then
    /// asserts the violation condition and checks again.
    pub fn run(&self, session: &mut Session, dump_script: bool) -> Result<ScenarioRun, MemoryError> {
        let start = Instant::now();
        session.reset();
        let violation = (self.program)(session);

        let setup = session.check()?;
        let report = match setup {
            CheckStatus::Sat => Some(session.model_report()?),
            _ => None,
        };

        session.assert(violation);
        let script = dump_script.then(|| session.to_script().to_string());
        let status = session.check()?;

        tracing::debug!(
            "{}: setup {setup}, final {status}, {} writes, {} assertions",
            self.name,
            session.write_count(),
            session.assertion_count()
        );

        Ok(ScenarioRun {
            setup,
            report,
            status,
            script,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Every built-in scenario, in order.
pub fn all() -> &'static [Scenario] {
    SCENARIOS
}

/// Look up a scenario by name.
pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "test0",
        title: "simple pointer",
        expected: Expected::Unsat,
        program: simple_pointer,
    },
    Scenario {
        name: "test1",
        title: "simple integers",
        expected: Expected::Unsat,
        program: simple_integers,
    },
    Scenario {
        name: "test2",
        title: "one-level pointers",
        expected: Expected::Unsat,
        program: one_level_pointers,
    },
    Scenario {
        name: "test3",
        title: "multi-level pointers",
        expected: Expected::Unsat,
        program: multi_level_pointers,
    },
    Scenario {
        name: "test4",
        title: "array and pointers",
        expected: Expected::Unsat,
        program: array_and_pointers,
    },
    Scenario {
        name: "test5",
        title: "branches",
        expected: Expected::Unsat,
        program: branches,
    },
    Scenario {
        name: "test6",
        title: "compare and pointers",
        expected: Expected::Unsat,
        program: compare_and_pointers,
    },
    Scenario {
        name: "test7",
        title: "branch arithmetic",
        expected: Expected::Unsat,
        program: branch_arithmetic,
    },
    Scenario {
        name: "test8",
        title: "array with branch",
        expected: Expected::Unsat,
        program: array_with_branch,
    },
    // Only base addresses are disjoint, so p + 1 may land on malloc2.
    Scenario {
        name: "test9",
        title: "struct fields",
        expected: Expected::Sat,
        program: struct_fields,
    },
    Scenario {
        name: "test10",
        title: "function calls",
        expected: Expected::Unsat,
        program: function_calls,
    },
];

// int *p = malloc; int q = 5; *p = q; int x = *p;
// The check is against x == 10, which must be impossible.
fn simple_pointer(s: &mut Session) -> Term {
    let p = s.variable("p");
    let q = s.variable("q");
    let _r = s.variable("r");
    let x = s.variable("x");

    let obj = s.object_address("malloc");
    s.assert(p.clone().equals(obj));
    s.assert(q.clone().equals(s.literal(5)));
    s.store(p.clone(), q);
    let loaded = s.load(&p);
    s.assert(x.clone().equals(loaded));

    x.equals(s.literal(10))
}

// a = 0; b = a + 1; assert(b > 0);
fn simple_integers(s: &mut Session) -> Term {
    let a = s.variable("a");
    let b = s.variable("b");

    s.assert(a.clone().equals(s.literal(0)));
    s.assert(b.clone().equals(a + s.literal(1)));

    b.le(s.literal(0))
}

// p = malloc; *p = 0; q = *p; *p = 3; b = *p + 1; assert(b > 3);
fn one_level_pointers(s: &mut Session) -> Term {
    let p = s.variable("p");
    let q = s.variable("q");
    let b = s.variable("b");

    let obj = s.object_address("malloc");
    s.assert(p.clone().equals(obj));
    s.store(p.clone(), s.literal(0));
    let first = s.load(&p);
    s.assert(q.equals(first));
    s.store(p.clone(), s.literal(3));
    let second = s.load(&p);
    s.assert(b.clone().equals(second + s.literal(1)));

    b.le(s.literal(3))
}

// p = malloc1; q = malloc2; *p = q; *q = 10; r = *p; x = *r; assert(x == 10);
fn multi_level_pointers(s: &mut Session) -> Term {
    let p = s.variable("p");
    let q = s.variable("q");
    let r = s.variable("r");
    let x = s.variable("x");

    let obj1 = s.object_address("malloc1");
    s.assert(p.clone().equals(obj1));
    let obj2 = s.object_address("malloc2");
    s.assert(q.clone().equals(obj2));
    s.store(p.clone(), q.clone());
    s.store(q, s.literal(10));
    let via_p = s.load(&p);
    s.assert(r.clone().equals(via_p));
    let via_r = s.load(&r);
    s.assert(x.clone().equals(via_r));

    x.not_equals(s.literal(10))
}

// p = malloc; x = &p[0]; y = &p[1]; *x = 10; *y = 11; a = *x; b = *y;
// assert(a + b > 20);
fn array_and_pointers(s: &mut Session) -> Term {
    let p = s.variable("p");
    let x = s.variable("x");
    let y = s.variable("y");
    let a = s.variable("a");
    let b = s.variable("b");

    let obj = s.object_address("malloc");
    s.assert(p.clone().equals(obj));
    s.assert(x.clone().equals(p.clone()));
    s.assert(y.clone().equals(p + s.literal(1)));
    s.store(x.clone(), s.literal(10));
    s.store(y.clone(), s.literal(11));
    let at_x = s.load(&x);
    s.assert(a.clone().equals(at_x));
    let at_y = s.load(&y);
    s.assert(b.clone().equals(at_y));

    (a + b).le(s.literal(20))
}

// a = argv + 1; b = 5; if (a > 10) b = a; b1 = b; assert(b1 >= 5);
fn branches(s: &mut Session) -> Term {
    let argv = s.variable("argv");
    let a = s.variable("a");
    let b = s.variable("b");
    let b1 = s.variable("b1");

    s.assert(a.clone().equals(argv + s.literal(1)));
    s.assert(b.clone().equals(s.literal(5)));
    s.assert(a.clone().gt(s.literal(10)).implies(b.clone().equals(a)));
    s.assert(b1.clone().equals(b));

    b1.lt(s.literal(5))
}

// a = malloc1; b = malloc2; *a = 5; *b = 10;
// if (*a < *b) p = a; else p = b; assert(*p == 5);
fn compare_and_pointers(s: &mut Session) -> Term {
    let a = s.variable("a");
    let b = s.variable("b");
    let p = s.variable("p");

    let obj1 = s.object_address("malloc1");
    s.assert(a.clone().equals(obj1));
    let obj2 = s.object_address("malloc2");
    s.assert(b.clone().equals(obj2));
    s.store(a.clone(), s.literal(5));
    s.store(b.clone(), s.literal(10));

    let at_a = s.load(&a);
    let at_b = s.load(&b);
    let cond = at_a.lt(at_b);
    s.assert(cond.clone().implies(p.clone().equals(a)));
    s.assert((!cond).implies(p.clone().equals(b)));

    s.load(&p).not_equals(s.literal(5))
}

// a = 1; b = 2; c = 3; if (a > 0) d = b + c; else d = b - c; assert(d == 5);
fn branch_arithmetic(s: &mut Session) -> Term {
    let a = s.variable("a");
    let b = s.variable("b");
    let c = s.variable("c");
    let d = s.variable("d");

    s.assert(a.clone().equals(s.literal(1)));
    s.assert(b.clone().equals(s.literal(2)));
    s.assert(c.clone().equals(s.literal(3)));

    let cond = a.gt(s.literal(0));
    s.assert(cond.clone().implies(d.clone().equals(b.clone() + c.clone())));
    s.assert((!cond).implies(d.clone().equals(b - c)));

    d.not_equals(s.literal(5))
}

// arr[2] = {0, 1}; a = 10; if (a > 5) p = &arr[0]; else p = &arr[1];
// assert(*p == 0);
fn array_with_branch(s: &mut Session) -> Term {
    let arr = s.variable("arr");
    let a = s.variable("a");
    let p = s.variable("p");

    s.store(arr.clone(), s.literal(0));
    s.store(arr.clone() + s.literal(1), s.literal(1));
    s.assert(a.clone().equals(s.literal(10)));

    let cond = a.gt(s.literal(5));
    s.assert(cond.clone().implies(p.clone().equals(arr.clone())));
    s.assert((!cond).implies(p.clone().equals(arr + s.literal(1))));

    s.load(&p).not_equals(s.literal(0))
}

// struct A { int f0; int *f1; };
// p = malloc1; x = malloc2; *x = 5; q = &p->f0; *q = 10; r = &p->f1;
// *r = x; y = *r; z = *q + *y; assert(z == 15);
fn struct_fields(s: &mut Session) -> Term {
    let p = s.variable("p");
    let x = s.variable("x");
    let q = s.variable("q");
    let r = s.variable("r");
    let y = s.variable("y");
    let z = s.variable("z");

    let obj1 = s.object_address("malloc1");
    s.assert(p.clone().equals(obj1));
    let obj2 = s.object_address("malloc2");
    s.assert(x.clone().equals(obj2));
    s.store(x.clone(), s.literal(5));

    s.assert(q.clone().equals(p.clone()));
    s.store(q.clone(), s.literal(10));

    s.assert(r.clone().equals(p + s.literal(1)));
    s.store(r.clone(), x);

    let at_r = s.load(&r);
    s.assert(y.clone().equals(at_r));
    let at_q = s.load(&q);
    let at_y = s.load(&y);
    s.assert(z.clone().equals(at_q + at_y));

    z.not_equals(s.literal(15))
}

// int foo(int z) { k = z; return k; }
// y = foo(2); x = foo(3); assert(x == 3 && y == 2);
// k is a single logical variable, so the two calls contradict each other.
fn function_calls(s: &mut Session) -> Term {
    let k = s.variable("k");
    let x = s.variable("x");
    let y = s.variable("y");

    s.assert(k.clone().equals(s.literal(2)));
    s.assert(y.clone().equals(k.clone()));
    s.assert(k.clone().equals(s.literal(3)));
    s.assert(x.clone().equals(k));

    !Term::and(vec![x.equals(s.literal(3)), y.equals(s.literal(2))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use symem_smtlib::script::Script;
    use symem_solver::{SolverBackend, SolverError, SolverResult};

    struct AlwaysUnsat;

    impl SolverBackend for AlwaysUnsat {
        fn check_sat(&self, _script: &Script) -> Result<SolverResult, SolverError> {
            Ok(SolverResult::Unsat)
        }
    }

    #[test]
    fn names_are_unique_and_findable() {
        let mut names: Vec<&str> = all().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 11);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 11);
        assert_eq!(find("test9").map(|s| s.expected), Some(Expected::Sat));
        assert!(find("test11").is_none());
    }

    #[test]
    fn expected_matches_only_its_status() {
        assert!(Expected::Unsat.matches(&CheckStatus::Unsat));
        assert!(!Expected::Unsat.matches(&CheckStatus::Sat));
        assert!(!Expected::Sat.matches(&CheckStatus::Unknown("timeout".into())));
    }

    #[test]
    fn run_resets_before_building() {
        let mut session = Session::new(Box::new(AlwaysUnsat));
        session.variable("leftover");

        let scenario = find("test1").unwrap();
        let run = scenario.run(&mut session, true).unwrap();

        assert_eq!(run.setup, CheckStatus::Unsat);
        assert!(run.report.is_none());
        let script = run.script.unwrap();
        assert!(!script.contains("leftover"));
        assert!(script.contains("(assert (<= b 0))"));
    }

    #[test]
    fn pointer_scenarios_use_the_store() {
        let mut session = Session::new(Box::new(AlwaysUnsat));
        for name in ["test0", "test2", "test3", "test4", "test6", "test8", "test9"] {
            find(name).unwrap().run(&mut session, false).unwrap();
            assert!(session.write_count() > 0, "{name} should write memory");
        }
        for name in ["test1", "test5", "test7", "test10"] {
            find(name).unwrap().run(&mut session, false).unwrap();
            assert_eq!(session.write_count(), 0, "{name} should not write memory");
        }
    }
}
