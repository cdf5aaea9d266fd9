use std::io::{self, BufRead, Write};

use anyhow::bail;
use tracing::{debug, info, instrument, warn};

use crate::api::{BoardService, CreateBoardOutcome};
use crate::blocks;
use crate::cli::Invocation;
use crate::config::Config;
use crate::model::{BlockSnapshot, Board, StoredUser, TaskBlock};
use crate::render::Renderer;
use crate::store::LocalStore;
use crate::theme::{self, Theme};
use crate::view;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "boards", "show", "create", "blocks", "block", "task", "theme", "user", "logout",
        "_commands", "help", "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(store, _cfg, api, renderer, inv))]
pub fn dispatch(
    store: &LocalStore,
    _cfg: &Config,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    inv: Invocation,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch_with(store, api, renderer, &mut input, &mut out, inv, assume_yes)
}

pub fn dispatch_with<R: BufRead, W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    input: &mut R,
    out: &mut W,
    inv: Invocation,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let command = inv.command.as_str();
    debug!(command, args = ?inv.args, "dispatching command");

    match command {
        "boards" => cmd_boards(store, api, renderer, out),
        "show" => cmd_show(api, renderer, out, &inv.args),
        "create" => cmd_create(api, input, out, &inv.args),
        "blocks" => cmd_blocks(store, renderer, out),
        "block" => cmd_block(store, api, renderer, input, out, &inv.args, assume_yes),
        "task" => cmd_task(store, api, renderer, input, out, &inv.args),
        "theme" => cmd_theme(store, api, out, &inv.args),
        "user" => cmd_user(store, out, &inv.args),
        "logout" => cmd_logout(store, out),
        "_commands" => {
            for name in known_command_names() {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
        "help" => cmd_help(out),
        "version" => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => bail!("unknown command: {other}"),
    }
}

#[instrument(skip(store, api, renderer, out))]
fn cmd_boards<W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    out: &mut W,
) -> anyhow::Result<()> {
    info!("command boards");

    let user = store.user()?;
    writeln!(out, "{}", view::greeting(user.as_ref()))?;
    writeln!(out)?;

    match api.boards() {
        Ok(boards) => renderer.print_boards(out, &boards),
        Err(err) => {
            // the board list is simply not shown when the fetch fails
            warn!(error = %err, "failed to load boards");
            Ok(())
        }
    }
}

#[instrument(skip(api, renderer, out, args))]
fn cmd_show<W: Write>(
    api: &dyn BoardService,
    renderer: &mut Renderer,
    out: &mut W,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command show");

    let Some(selector) = args.first() else {
        bail!("show requires a board id or name");
    };

    let boards = match api.boards() {
        Ok(boards) => boards,
        Err(err) => {
            warn!(error = %err, "failed to load boards while resolving selector");
            vec![]
        }
    };

    let (board_id, title) = match select_board(&boards, selector) {
        Some(board) => (board.id, board.name.clone()),
        None => match selector.parse::<u64>() {
            Ok(id) => (id, format!("Board {id}")),
            Err(_) => bail!("unknown board: {selector}"),
        },
    };

    let columns = match api.columns(board_id) {
        Ok(columns) => columns,
        Err(err) => {
            // same policy as the board list: log and show nothing
            warn!(board_id, error = %err, "failed to load columns");
            return Ok(());
        }
    };

    let board_view = view::build_board_view(&title, &columns, |column_id| api.tasks(column_id));
    renderer.print_board(out, &board_view)
}

fn select_board<'a>(boards: &'a [Board], selector: &str) -> Option<&'a Board> {
    if let Ok(id) = selector.parse::<u64>() {
        if let Some(board) = boards.iter().find(|board| board.id == id) {
            return Some(board);
        }
    }
    boards
        .iter()
        .find(|board| board.name.eq_ignore_ascii_case(selector))
}

#[instrument(skip(api, input, out, args))]
fn cmd_create<R: BufRead, W: Write>(
    api: &dyn BoardService,
    input: &mut R,
    out: &mut W,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command create");

    let name = match arg_or_prompt(input, out, args, "Digite o nome da nova board: ")? {
        Some(name) => name,
        None => {
            writeln!(out, "O nome da board não pode estar vazio.")?;
            return Ok(());
        }
    };

    match api.create_board(&name) {
        CreateBoardOutcome::Created(created) => {
            writeln!(out, "Board criada com sucesso: {created}")?;
        }
        CreateBoardOutcome::Rejected(message) => {
            writeln!(out, "Erro ao criar a board: {message}")?;
        }
        CreateBoardOutcome::Unreachable => {
            writeln!(out, "Não foi possível criar a board. Verifique sua conexão.")?;
        }
    }

    Ok(())
}

#[instrument(skip(store, renderer, out))]
fn cmd_blocks<W: Write>(
    store: &LocalStore,
    renderer: &mut Renderer,
    out: &mut W,
) -> anyhow::Result<()> {
    info!("command blocks");
    let blocks = store.load_blocks()?;
    renderer.print_blocks(out, &blocks)
}

#[instrument(skip(store, api, renderer, input, out, args))]
fn cmd_block<R: BufRead, W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    input: &mut R,
    out: &mut W,
    args: &[String],
    assume_yes: bool,
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => {
            let title = match arg_or_prompt(
                input,
                out,
                &args[1..],
                "Digite o nome do bloco de tarefas: ",
            )? {
                Some(title) => title,
                None => {
                    debug!("empty block title; aborting with no side effect");
                    return Ok(());
                }
            };

            let mut blocks = store.load_blocks()?;
            blocks::create_block(&mut blocks, title.clone());
            persist_and_mirror(store, api, renderer, out, blocks)?;
            writeln!(out, "Bloco \"{title}\" criado.")?;
            Ok(())
        }
        Some("rm") => {
            let Some(raw_index) = args.get(1) else {
                bail!("usage: block rm <index>");
            };
            let index = parse_index(raw_index, "block")?;

            if !assume_yes
                && !confirm(input, out, "Tem certeza de que deseja excluir este bloco? [y/N] ")?
            {
                writeln!(out, "Cancelado.")?;
                return Ok(());
            }

            let mut blocks = store.load_blocks()?;
            let removed = blocks::remove_block(&mut blocks, index)?;
            persist_and_mirror(store, api, renderer, out, blocks)?;
            writeln!(out, "Bloco \"{}\" excluído.", removed.title)?;
            Ok(())
        }
        _ => bail!("usage: block <add [title] | rm <index>>"),
    }
}

#[instrument(skip(store, api, renderer, input, out, args))]
fn cmd_task<R: BufRead, W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    input: &mut R,
    out: &mut W,
    args: &[String],
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => {
            let Some(raw_block) = args.get(1) else {
                bail!("usage: task add <block-index> [name]");
            };
            let block_index = parse_index(raw_block, "block")?;

            let name =
                match arg_or_prompt(input, out, &args[2..], "Digite o nome da tarefa: ")? {
                    Some(name) => name,
                    None => {
                        debug!("empty task name; aborting with no side effect");
                        return Ok(());
                    }
                };

            let mut blocks = store.load_blocks()?;
            blocks::add_task(&mut blocks, block_index, name.clone())?;
            persist_and_mirror(store, api, renderer, out, blocks)?;
            writeln!(out, "Tarefa \"{name}\" adicionada.")?;
            Ok(())
        }
        // task removal is immediate, no confirmation
        Some("rm") => {
            let (Some(raw_block), Some(raw_task)) = (args.get(1), args.get(2)) else {
                bail!("usage: task rm <block-index> <task-index>");
            };
            let block_index = parse_index(raw_block, "block")?;
            let task_index = parse_index(raw_task, "task")?;

            let mut blocks = store.load_blocks()?;
            let removed = blocks::remove_task(&mut blocks, block_index, task_index)?;
            persist_and_mirror(store, api, renderer, out, blocks)?;
            writeln!(out, "Tarefa \"{removed}\" excluída.")?;
            Ok(())
        }
        _ => bail!("usage: task <add <block-index> [name] | rm <block-index> <task-index>>"),
    }
}

/// The write path of every block mutation: full local snapshot first, then
/// the best-effort mirror, whose outcome is reported rather than swallowed.
fn persist_and_mirror<W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    renderer: &mut Renderer,
    out: &mut W,
    blocks: Vec<TaskBlock>,
) -> anyhow::Result<()> {
    store.save_blocks(&blocks)?;
    let outcome = api.mirror_blocks(&BlockSnapshot { blocks });
    renderer.print_sync_outcome(out, &outcome)
}

#[instrument(skip(store, api, out, args))]
fn cmd_theme<W: Write>(
    store: &LocalStore,
    api: &dyn BoardService,
    out: &mut W,
    args: &[String],
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        None => match theme::resolve(store, api)? {
            Some(current) => writeln!(out, "Tema atual: {current}")?,
            None => writeln!(out, "Nenhum tema aplicado.")?,
        },
        Some("toggle") => {
            let next = theme::toggle(store, api)?;
            writeln!(out, "Tema aplicado: {next}")?;
        }
        Some(raw) => {
            let chosen: Theme = raw.parse()?;
            store.set_theme(chosen)?;
            writeln!(out, "Tema aplicado: {chosen}")?;
        }
    }
    Ok(())
}

#[instrument(skip(store, out, args))]
fn cmd_user<W: Write>(store: &LocalStore, out: &mut W, args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        let user = store.user()?;
        writeln!(out, "{}", view::greeting(user.as_ref()))?;
        return Ok(());
    }

    let user = StoredUser {
        name: args.join(" "),
    };
    store.set_user(&user)?;
    writeln!(out, "{}", view::greeting(Some(&user)))?;
    Ok(())
}

#[instrument(skip(store, out))]
fn cmd_logout<W: Write>(store: &LocalStore, out: &mut W) -> anyhow::Result<()> {
    store.clear_user()?;
    writeln!(out, "Usuário removido.")?;
    Ok(())
}

fn cmd_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "usage: boardctl [options] <command> [args]")?;
    writeln!(out)?;
    writeln!(out, "  boards                       list remote boards")?;
    writeln!(out, "  show <id|name>               show one board's columns and tasks")?;
    writeln!(out, "  create [name]                create a remote board")?;
    writeln!(out, "  blocks                       list local task blocks")?;
    writeln!(out, "  block add [title]            create a task block")?;
    writeln!(out, "  block rm <n>                 delete a task block (asks first)")?;
    writeln!(out, "  task add <n> [name]          add a task to block n")?;
    writeln!(out, "  task rm <n> <m>              delete task m from block n")?;
    writeln!(out, "  theme [dark|light|toggle]    show or change the theme")?;
    writeln!(out, "  user [name]                  show or set the stored user")?;
    writeln!(out, "  logout                       clear the stored user")?;
    Ok(())
}

fn parse_index(raw: &str, what: &str) -> anyhow::Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => bail!("{what} index must be a positive number, got: {raw}"),
    }
}

/// Joined arguments when present, otherwise one interactive line. A blank
/// or cancelled (EOF) answer yields `None`.
fn arg_or_prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    args: &[String],
    message: &str,
) -> anyhow::Result<Option<String>> {
    let joined = args.join(" ");
    let joined = joined.trim();
    if !joined.is_empty() {
        return Ok(Some(joined.to_string()));
    }

    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> anyhow::Result<bool> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "s" | "sim"))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::{dispatch_with, expand_command_abbrev, known_command_names};
    use crate::api::{BoardService, CreateBoardOutcome, SyncOutcome};
    use crate::cli::Invocation;
    use crate::config::Config;
    use crate::model::{BlockSnapshot, Board, Column, TaskCard, ThemeEntry};
    use crate::render::Renderer;
    use crate::store::LocalStore;

    #[derive(Default)]
    struct FakeService {
        boards: Vec<Board>,
        boards_fail: bool,
        columns: HashMap<u64, Vec<Column>>,
        tasks: HashMap<u64, Vec<TaskCard>>,
        themes: Vec<ThemeEntry>,
        mirror_fails: bool,
        // None echoes the requested name back as Created
        create_outcome: Option<CreateBoardOutcome>,
        column_calls: RefCell<Vec<u64>>,
        theme_calls: RefCell<u32>,
        mirrored: RefCell<Vec<BlockSnapshot>>,
        created_names: RefCell<Vec<String>>,
    }

    impl BoardService for FakeService {
        fn boards(&self) -> anyhow::Result<Vec<Board>> {
            if self.boards_fail {
                anyhow::bail!("HTTP 500");
            }
            Ok(self.boards.clone())
        }

        fn columns(&self, board_id: u64) -> anyhow::Result<Vec<Column>> {
            self.column_calls.borrow_mut().push(board_id);
            Ok(self.columns.get(&board_id).cloned().unwrap_or_default())
        }

        fn tasks(&self, column_id: u64) -> Vec<TaskCard> {
            // failed fetches already collapse to the empty list
            self.tasks.get(&column_id).cloned().unwrap_or_default()
        }

        fn themes(&self) -> anyhow::Result<Vec<ThemeEntry>> {
            *self.theme_calls.borrow_mut() += 1;
            Ok(self.themes.clone())
        }

        fn mirror_blocks(&self, snapshot: &BlockSnapshot) -> SyncOutcome {
            self.mirrored.borrow_mut().push(snapshot.clone());
            if self.mirror_fails {
                SyncOutcome::Failed("connection refused".to_string())
            } else {
                SyncOutcome::Accepted(serde_json::Value::Null)
            }
        }

        fn create_board(&self, name: &str) -> CreateBoardOutcome {
            self.created_names.borrow_mut().push(name.to_string());
            match &self.create_outcome {
                Some(outcome) => outcome.clone(),
                None => CreateBoardOutcome::Created(name.to_string()),
            }
        }
    }

    struct Harness {
        _temp: tempfile::TempDir,
        store: LocalStore,
        renderer: Renderer,
    }

    fn harness() -> Harness {
        let temp = tempdir().expect("tempdir");
        let store = LocalStore::open(temp.path()).expect("open store");
        let cfg = Config::defaults_for_tests();
        let renderer = Renderer::new(&cfg).expect("renderer");
        Harness {
            _temp: temp,
            store,
            renderer,
        }
    }

    fn run(
        harness: &mut Harness,
        api: &FakeService,
        command: &str,
        args: &[&str],
        stdin: &str,
        assume_yes: bool,
    ) -> (anyhow::Result<()>, String) {
        let inv = Invocation {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        };
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out: Vec<u8> = Vec::new();
        let result = dispatch_with(
            &harness.store,
            api,
            &mut harness.renderer,
            &mut input,
            &mut out,
            inv,
            assume_yes,
        );
        (result, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn show_issues_exactly_one_column_fetch_for_the_selected_board() {
        let mut h = harness();
        let api = FakeService {
            boards: vec![
                Board {
                    id: 1,
                    name: "Pessoal".to_string(),
                },
                Board {
                    id: 2,
                    name: "Trabalho".to_string(),
                },
            ],
            columns: HashMap::from([(
                2,
                vec![Column {
                    id: 21,
                    name: "A Fazer".to_string(),
                }],
            )]),
            tasks: HashMap::from([(21, vec![TaskCard::default()])]),
            ..FakeService::default()
        };

        let (result, text) = run(&mut h, &api, "show", &["Trabalho"], "", false);
        result.expect("show should succeed");

        assert_eq!(*api.column_calls.borrow(), vec![2]);
        assert!(text.contains("Trabalho"));
        assert!(text.contains("Sem título"));
        assert!(text.contains("Sem descrição"));
    }

    #[test]
    fn failed_task_fetch_renders_empty_column_without_error() {
        let mut h = harness();
        let api = FakeService {
            boards: vec![Board {
                id: 1,
                name: "Pessoal".to_string(),
            }],
            columns: HashMap::from([(
                1,
                vec![Column {
                    id: 11,
                    name: "Bloqueado".to_string(),
                }],
            )]),
            // no task entry for column 11: the service already swallowed
            // the failure into an empty list
            ..FakeService::default()
        };

        let (result, text) = run(&mut h, &api, "show", &["1"], "", false);
        result.expect("show should succeed");
        assert!(text.contains("Bloqueado"));
        assert!(!text.contains("Sem título"));
    }

    #[test]
    fn boards_fetch_failure_is_logged_not_surfaced() {
        let mut h = harness();
        let api = FakeService {
            boards_fail: true,
            ..FakeService::default()
        };

        let (result, text) = run(&mut h, &api, "boards", &[], "", false);
        result.expect("boards should not error");
        assert!(text.contains("Usuário não identificado"));
        assert!(!text.contains("ID"));
    }

    #[test]
    fn create_board_surfaces_each_outcome() {
        let mut h = harness();

        let api = FakeService::default();
        let (result, text) = run(&mut h, &api, "create", &["Nova Board"], "", false);
        result.expect("create");
        assert!(text.contains("Board criada com sucesso: Nova Board"));
        assert_eq!(*api.created_names.borrow(), vec!["Nova Board"]);

        // server rejection surfaces the backend's message field
        let api = FakeService {
            create_outcome: Some(CreateBoardOutcome::Rejected("nome já existe".to_string())),
            ..FakeService::default()
        };
        let (result, text) = run(&mut h, &api, "create", &["Nova Board"], "", false);
        result.expect("rejected create is not an error");
        assert!(text.contains("Erro ao criar a board: nome já existe"));

        // transport failure gets the generic connectivity message
        let api = FakeService {
            create_outcome: Some(CreateBoardOutcome::Unreachable),
            ..FakeService::default()
        };
        let (result, text) = run(&mut h, &api, "create", &["Nova Board"], "", false);
        result.expect("unreachable create is not an error");
        assert!(text.contains("Não foi possível criar a board. Verifique sua conexão."));
    }

    #[test]
    fn create_board_prompts_and_aborts_on_empty_name() {
        let mut h = harness();
        let api = FakeService::default();

        let (result, text) = run(&mut h, &api, "create", &[], "\n", false);
        result.expect("aborted create is not an error");
        assert!(text.contains("O nome da board não pode estar vazio."));
        assert!(api.created_names.borrow().is_empty());

        let (result, text) = run(&mut h, &api, "create", &[], "Minha Board\n", false);
        result.expect("create via prompt");
        assert!(text.contains("Digite o nome da nova board: "));
        assert!(text.contains("Board criada com sucesso: Minha Board"));
        assert_eq!(*api.created_names.borrow(), vec!["Minha Board"]);
    }

    #[test]
    fn empty_prompt_input_leaves_store_and_mirror_untouched() {
        let mut h = harness();
        let api = FakeService::default();

        let (result, _) = run(&mut h, &api, "block", &["add"], "\n", false);
        result.expect("aborted add is not an error");

        assert!(h.store.load_blocks().expect("load").is_empty());
        assert!(api.mirrored.borrow().is_empty());
    }

    #[test]
    fn block_mutations_write_full_snapshot_and_mirror_it() {
        let mut h = harness();
        let api = FakeService::default();

        let (result, text) = run(&mut h, &api, "block", &["add", "Compras"], "", false);
        result.expect("block add");
        assert!(text.contains("Bloco \"Compras\" criado."));
        assert!(text.contains("Dados enviados para a API."));

        let (result, _) = run(&mut h, &api, "task", &["add", "1", "Leite"], "", false);
        result.expect("task add");

        let stored = h.store.load_blocks().expect("load");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].tasks, vec!["Leite"]);

        let mirrored = api.mirrored.borrow();
        assert_eq!(mirrored.len(), 2);
        assert_eq!(mirrored[1].blocks, stored);
    }

    #[test]
    fn mirror_failure_is_reported_but_local_write_stands() {
        let mut h = harness();
        let api = FakeService {
            mirror_fails: true,
            ..FakeService::default()
        };

        let (result, text) = run(&mut h, &api, "block", &["add", "Compras"], "", false);
        result.expect("block add");
        assert!(text.contains("Erro ao enviar dados para a API"));
        assert_eq!(h.store.load_blocks().expect("load").len(), 1);
    }

    #[test]
    fn block_removal_asks_for_confirmation() {
        let mut h = harness();
        let api = FakeService::default();
        run(&mut h, &api, "block", &["add", "Compras"], "", false)
            .0
            .expect("block add");

        let (result, text) = run(&mut h, &api, "block", &["rm", "1"], "n\n", false);
        result.expect("declined rm is not an error");
        assert!(text.contains("Cancelado."));
        assert_eq!(h.store.load_blocks().expect("load").len(), 1);

        let (result, text) = run(&mut h, &api, "block", &["rm", "1"], "", true);
        result.expect("block rm with --yes");
        assert!(text.contains("Bloco \"Compras\" excluído."));
        assert!(h.store.load_blocks().expect("load").is_empty());
    }

    #[test]
    fn task_removal_needs_no_confirmation() {
        let mut h = harness();
        let api = FakeService::default();
        run(&mut h, &api, "block", &["add", "Compras"], "", false)
            .0
            .expect("block add");
        run(&mut h, &api, "task", &["add", "1", "Leite"], "", false)
            .0
            .expect("task add");

        let (result, text) = run(&mut h, &api, "task", &["rm", "1", "1"], "", false);
        result.expect("task rm");
        assert!(text.contains("Tarefa \"Leite\" excluída."));
        assert!(h.store.load_blocks().expect("load")[0].tasks.is_empty());
    }

    #[test]
    fn local_theme_wins_over_remote_active_entry() {
        let mut h = harness();
        let api = FakeService {
            themes: vec![ThemeEntry {
                label: "Dark".to_string(),
                is_active: true,
            }],
            ..FakeService::default()
        };

        let (result, text) = run(&mut h, &api, "theme", &[], "", false);
        result.expect("theme show");
        assert!(text.contains("Tema atual: dark"));
        assert_eq!(*api.theme_calls.borrow(), 1);

        run(&mut h, &api, "theme", &["light"], "", false)
            .0
            .expect("theme set");

        let (result, text) = run(&mut h, &api, "theme", &[], "", false);
        result.expect("theme show");
        assert!(text.contains("Tema atual: light"));
        // remote list no longer consulted once a local value exists
        assert_eq!(*api.theme_calls.borrow(), 1);
    }

    #[test]
    fn command_abbreviations_expand_unambiguously() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("show", &known), Some("show"));
        assert_eq!(expand_command_abbrev("cr", &known), Some("create"));
        assert_eq!(expand_command_abbrev("block", &known), Some("block"));
        assert_eq!(expand_command_abbrev("bl", &known), None);
        assert_eq!(expand_command_abbrev("t", &known), None);
    }
}
