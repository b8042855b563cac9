mod create_branch_without_commits;
mod create_duplicate_branch;
