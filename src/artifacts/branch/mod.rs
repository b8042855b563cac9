pub mod branch_name;

/// Git ref-name rules: no leading dot or slash, no `..`, no `/.`, no trailing
/// slash or `.lock`, no `@{`, no control, space or glob characters
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

pub const DEFAULT_BRANCH: &str = "main";
