#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::PathBuf;

    use crate::{
        args::{Cli, Config, ConfigFile, ExportMethodType},
        lookup_table::DuplicatePolicy,
    };

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["flowtag", "flow.log", "lookup.csv"]).unwrap();
        let config = Config::resolve(cli, ConfigFile::default());

        assert_eq!(config.flow_log, PathBuf::from("flow.log"));
        assert_eq!(config.lookup, PathBuf::from("lookup.csv"));
        assert_eq!(config.output, ExportMethodType::File);
        assert_eq!(config.export_path, None);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["flowtag", "flow.log"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let cli = Cli::try_parse_from([
            "flowtag",
            "flow.log",
            "lookup.csv",
            "--output",
            "print",
            "--export-path",
            "cli.txt",
        ])
        .unwrap();
        let file = ConfigFile {
            output: ExportMethodType::File,
            export_path: Some(PathBuf::from("file.txt")),
            reject_duplicate_keys: false,
        };
        let config = Config::resolve(cli, file);

        assert_eq!(config.output, ExportMethodType::Print);
        assert_eq!(config.export_path, Some(PathBuf::from("cli.txt")));
    }

    #[test]
    fn test_config_file_fills_unset_options() {
        let cli = Cli::try_parse_from(["flowtag", "flow.log", "lookup.csv"]).unwrap();
        let file = ConfigFile {
            output: ExportMethodType::Print,
            export_path: Some(PathBuf::from("file.txt")),
            reject_duplicate_keys: true,
        };
        let config = Config::resolve(cli, file);

        assert_eq!(config.output, ExportMethodType::Print);
        assert_eq!(config.export_path, Some(PathBuf::from("file.txt")));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_reject_duplicate_keys_flag() {
        let cli = Cli::try_parse_from([
            "flowtag",
            "--reject-duplicate-keys",
            "flow.log",
            "lookup.csv",
        ])
        .unwrap();
        let config = Config::resolve(cli, ConfigFile::default());

        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowtag.toml");
        std::fs::write(&path, "output = \"print\"\nreject_duplicate_keys = true\n").unwrap();

        let file: ConfigFile = confy::load_path(&path).unwrap();

        assert_eq!(file.output, ExportMethodType::Print);
        assert_eq!(file.export_path, None);
        assert!(file.reject_duplicate_keys);
    }
}
