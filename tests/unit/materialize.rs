use newplus_cli::templates::{
    DiscoveryOptions, MaterializeOptions, Materializer, TemplateKind, discover, find_template,
};
use newplus_cli::test_utils::TestEnvironment;

#[test]
fn test_discovery_is_one_level_and_sorted() {
    let env = TestEnvironment::builder()
        .unwrap()
        .with_template("b.txt", "b")
        .with_template("A.txt", "a")
        .with_template("10. Later.md", "later")
        .with_template("Folder/nested/deep.txt", "deep")
        .build()
        .unwrap();

    let templates = discover(&env.templates_dir, &DiscoveryOptions::default()).unwrap();
    let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["10. Later.md", "A.txt", "b.txt", "Folder"]);
    assert_eq!(templates[0].display_name, "Later.md");
    assert_eq!(templates[3].kind, TemplateKind::Folder);
}

#[tokio::test]
async fn test_folder_template_end_to_end() {
    let env = TestEnvironment::with_samples().unwrap();
    let templates = discover(&env.templates_dir, &DiscoveryOptions::default()).unwrap();
    let crate_tpl = find_template(&templates, "crate").unwrap();

    let report = Materializer::new(MaterializeOptions::default())
        .materialize(crate_tpl, &env.dest_dir, Some("widget"), env.variables().unwrap())
        .await
        .unwrap();

    assert_eq!(report.target, env.dest_dir.join("widget"));
    assert_eq!(report.files.len(), 2);
    assert!(report.unresolved.is_empty());
    assert_eq!(env.read_dest("widget/Cargo.toml").unwrap(), "[package]\nname = \"widget\"\n");
    assert!(env.dest_exists("widget/src/main.rs"));
}

#[tokio::test]
async fn test_file_template_with_fixed_builtins() {
    let env = TestEnvironment::with_samples().unwrap();
    let templates = discover(&env.templates_dir, &DiscoveryOptions::default()).unwrap();
    let readme = find_template(&templates, "Readme.md").unwrap();

    Materializer::default()
        .materialize(readme, &env.dest_dir, None, env.variables().unwrap())
        .await
        .unwrap();

    assert_eq!(env.read_dest("Readme.md").unwrap(), "# Readme\nby Test Author\n");
}
