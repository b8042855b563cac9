mod show_diff_between_files;
