mod checkout_keeps_ignored_files;
mod checkout_refuses_dirty_working_tree;
mod checkout_restores_snapshots;
