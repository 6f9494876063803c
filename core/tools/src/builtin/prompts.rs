//! Tool description strings shown to the model in the tool-use schema.

pub const READ_DESCRIPTION: &str = "\
Reads a file from the local filesystem. Returns the file's contents with \
line numbers, or an error if the path does not exist or is a directory.

Use an absolute path. For large files, pass `offset` and `limit` to window \
the read instead of reading the entire file at once.";

pub const WRITE_DESCRIPTION: &str = "\
Writes content to a file on the local filesystem, creating it if it does \
not exist and overwriting it if it does.

An existing file must be read with the Read tool before it can be \
overwritten, so the model does not blindly destroy content it has never \
seen.";

pub const GLOB_DESCRIPTION: &str = "\
Finds files matching a glob pattern (e.g. `**/*.rs`, `src/**/*.ts`), \
sorted by modification time, most recent first. Respects `.gitignore` \
and `.ignore` files. Use this instead of shelling out to `find` or `ls`.";

pub const GREP_DESCRIPTION: &str = "\
Searches file contents using a regular expression, powered by ripgrep's \
matching engine. Supports filtering by glob and file type, multiline \
patterns, and several output modes (matching lines, file names only, or \
match counts). Respects `.gitignore` and `.ignore` files.";

pub const LS_DESCRIPTION: &str = "\
Lists the contents of a directory. Accepts an absolute path and an \
optional list of glob patterns to ignore. Prefer Glob or Grep when \
searching for something specific.";

pub const EDIT_DESCRIPTION: &str = "\
Performs an exact string replacement in a file. The `old_string` must \
match the file's contents exactly, including whitespace and \
indentation, and must be unique unless `replace_all` is set. The file \
must have been read with the Read tool first.";

pub const SMART_EDIT_DESCRIPTION: &str = "\
Edits a file the same way the Edit tool does, but falls back to \
whitespace-flexible and fuzzy matching when an exact match fails, \
trading some precision for resilience against minor drift between what \
the model remembers and the file's current contents.";

pub const NOTEBOOK_EDIT_DESCRIPTION: &str = "\
Edits a single cell of a Jupyter notebook (`.ipynb`) by replacing, \
inserting, or deleting it. A cell is addressed by its `cell_id` or by \
its 0-indexed `cell_number`. The notebook must have been read with the \
Read tool first.";

pub const APPLY_PATCH_DESCRIPTION: &str = "\
Applies a batch of file changes described in the apply_patch format: a \
sequence of Add File / Delete File / Update File hunks between \
`*** Begin Patch` and `*** End Patch` markers. Use this for \
multi-file or multi-hunk changes instead of issuing several Edit calls.";

pub const APPLY_PATCH_FREEFORM_DESCRIPTION: &str = "\
Applies a batch of file changes described directly in the apply_patch \
grammar (no surrounding JSON). Prefer this variant when the model \
supports custom grammar-constrained tools.";

pub const READ_MANY_FILES_DESCRIPTION: &str = "\
Reads several files in a single call, returning each one's contents \
with line numbers. More efficient than issuing one Read call per file \
when the model already knows exactly which files it needs.";

pub const BASH_DESCRIPTION: &str = "\
Executes a shell command and returns its stdout/stderr. Commands run \
through a persistent shell session, so working-directory changes \
(`cd`) and environment changes carry over between calls. Supports \
running a command in the background and retrieving its output later \
with the TaskOutput tool.";

pub const SHELL_DESCRIPTION: &str = "\
Executes a single command directly by argv, with no shell \
interpretation (no globbing, pipes, or redirection). Prefer this over \
Bash when the command and its arguments are already known exactly, \
since it removes an entire class of shell-injection risk.";

pub const TASK_DESCRIPTION: &str = "\
Delegates a unit of work to a subagent running its own turn loop, \
returning that subagent's final result once it completes. Use this to \
parallelize independent exploration or to scope a large task down to a \
focused context.";

pub const TASK_OUTPUT_DESCRIPTION: &str = "\
Retrieves the output of a previously started background task, \
identified by the `task_id` returned when it was started.";

pub const TASK_STOP_DESCRIPTION: &str = "\
Stops a running background task by its `task_id`.";

pub const TODO_WRITE_DESCRIPTION: &str = "\
Creates or updates the session's todo list, used to track progress on \
a multi-step task. Pass the complete, up-to-date list of todo items on \
every call; it replaces the previous list rather than merging into it.";

pub const SKILL_DESCRIPTION: &str = "\
Loads a named skill's instructions into the current turn. Use this \
when the user invokes a skill by name or when a listed skill's \
description matches the task at hand.";

pub const WEB_FETCH_DESCRIPTION: &str = "\
Fetches a URL and returns its content converted to readable text or \
markdown. Use this to read documentation, issues, or other web pages \
the model cannot otherwise access.";

pub const WEB_SEARCH_DESCRIPTION: &str = "\
Searches the web for a query and returns a list of results with \
titles, URLs, and snippets. Use this to find up-to-date information \
not present in the model's training data.";

pub const ENTER_PLAN_MODE_DESCRIPTION: &str = "\
Switches the session into plan mode: a read-only exploration mode in \
which the Write and Edit tools may only modify a single plan file. Use \
this before making changes to a codebase the model has not yet \
explored, so it can draft and share a plan before acting on it.";

pub const EXIT_PLAN_MODE_DESCRIPTION: &str = "\
Exits plan mode and presents the drafted plan for approval before \
continuing with unrestricted tool access.";

pub const ASK_USER_QUESTION_DESCRIPTION: &str = "\
Poses one or more multiple-choice questions to the user and returns \
their answers. Use this when a decision genuinely requires user input \
rather than guessing at their intent.";

pub const LSP_DESCRIPTION: &str = "\
Queries a language server for code-intelligence information: go to \
definition, find references, document symbols, or hover. Requires a \
language server to be configured for the relevant language.";
