mod cat_file_resolves_abbreviated_ids;
mod corrupt_objects_are_reported;
