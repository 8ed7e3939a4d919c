//! End-to-end checks of whole-file analysis.

use pretty_assertions::assert_eq;
use stdinc_config::headers::builtin_table;
use stdinc_core::{Analyzer, AnalysisError, HeaderRegistry, SourceText};
use stdinc_core::usage::extract_usages;
use stdinc_test_utils::tracing_setup::init_test_tracing;
use stdinc_test_utils::{SourceTree, TestConfigBuilder};

fn analyzer() -> Analyzer {
    Analyzer::from_config(&TestConfigBuilder::new().namespace_prefix("TMCompiler").build())
        .unwrap()
}

// ── Scenarios ─────────────────────────────────────────────────────

#[test]
fn test_vector_declared_map_used() {
    let d = analyzer().analyze_source("#include <vector>\n\nstd::map<int,int> m;\n");

    assert!(d.unrecognized.is_empty());
    assert_eq!(d.missing_includes.len(), 1);
    assert_eq!(d.missing_includes[0].header, "map");
    assert_eq!(d.missing_includes[0].symbol, "std::map");
    assert_eq!(d.missing_includes[0].line, 3);
    assert_eq!(d.unused_headers.len(), 1);
    assert_eq!(d.unused_headers[0].header, "vector");
    assert_eq!(d.unused_headers[0].line, 1);
}

#[test]
fn test_iostream_with_cout_is_clean() {
    let d = analyzer().analyze_source(
        "#include <iostream>\n\nint main() {\n    std::cout << \"hi\";\n}\n",
    );
    assert!(d.is_empty());
}

#[test]
fn test_unknown_symbol_is_reported_once_regardless_of_includes() {
    for includes in ["", "#include <vector>\n", "#include <foobar>\n#include <map>\n"] {
        let text = format!("{includes}void f() {{ std::foobar(); std::foobar(); }}\n");
        let d = analyzer().analyze_source(&text);
        let symbols: Vec<&str> = d.unrecognized.iter().map(|u| u.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["std::foobar"], "includes: {includes:?}");
        assert!(d.missing_includes.is_empty());
    }
}

#[test]
fn test_no_std_usage_reports_only_unused_headers() {
    let a = analyzer();
    assert!(a.analyze_source("int main() { return 0; }\n").is_empty());

    let d = a.analyze_source("#include <string>\n#include <TMCompiler/a.hpp>\nint main() {}\n");
    assert!(d.unrecognized.is_empty());
    assert!(d.missing_includes.is_empty());
    let unused: Vec<&str> = d.unused_headers.iter().map(|u| u.header.as_str()).collect();
    assert_eq!(unused, vec!["string"]);
}

#[test]
fn test_each_registry_symbol_with_its_header_is_clean() {
    let a = Analyzer::new(HeaderRegistry::new(&builtin_table()).unwrap(), None);
    for (header, symbols) in builtin_table() {
        for symbol in symbols {
            let text = format!("#include <{header}>\nauto x = {symbol};\n");
            let d = a.analyze_source(&text);
            assert!(d.is_empty(), "{symbol} with <{header}>: {d:?}");
        }
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let text = "#include <set>\n#include <vector>\n\
                std::map<int, std::string> m; // std::list\n\
                std::foobar x; std::cout << \"std::endl\";\n";
    let a = analyzer();
    let first = a.analyze_source(text);
    let second = a.analyze_source(text);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ── Scanner immunity ──────────────────────────────────────────────

#[test]
fn test_comment_only_line_contributes_nothing() {
    assert!(extract_usages(&SourceText::new("// std::vector<int> v;")).is_empty());
}

#[test]
fn test_string_followed_by_paren_boundary() {
    let used = extract_usages(&SourceText::new("auto s = std::string(\"abc\");"));
    let symbols: Vec<&str> = used.iter().map(|(s, _)| s).collect();
    assert_eq!(symbols, vec!["std::string"]);
}

#[test]
fn test_realistic_file() {
    let text = r#"
#include <TMCompiler/compiler/compiler.hpp>

#include <iostream>
#include <map>
#include <string>   // for std::string
#include <vector>

/*
 * std::list is not used here; neither is std::set.
 */
namespace TMCompiler {

std::string greet(const std::string& name) {
    // std::cout << "debug";
    return "hello std::map " + name;
}

int run() {
    std::map<std::string, int> counts;
    std::cout << greet("x") << std::endl;
    auto n = std::stoi("3");
    return static_cast<int>(counts.size()) + n;
}

}  // namespace TMCompiler
"#;
    let d = analyzer().analyze_source(text);

    let unrecognized: Vec<&str> = d.unrecognized.iter().map(|u| u.symbol.as_str()).collect();
    assert_eq!(unrecognized, vec!["std::stoi"]);
    assert!(d.missing_includes.is_empty());
    let unused: Vec<&str> = d.unused_headers.iter().map(|u| u.header.as_str()).collect();
    assert_eq!(unused, vec!["vector"]);
}

// ── Files on disk ─────────────────────────────────────────────────

#[test]
fn test_unreadable_file_does_not_affect_others() {
    init_test_tracing();
    let tree = SourceTree::new();
    let good = tree.file("src/good.cpp", "#include <vector>\nstd::vector<int> v;\n");
    let bad = tree.file("src/bad.hpp", "#include <list>\n");
    let missing = tree.missing("src/gone.cpp");

    let a = analyzer();
    let results: Vec<_> = [&good, &missing, &bad]
        .into_iter()
        .map(|p| a.analyze_path(p))
        .collect();

    assert!(matches!(results[0], Ok(None)));
    assert!(matches!(&results[1], Err(AnalysisError::Io { path, .. }) if *path == missing));
    let report = results[2].as_ref().unwrap().as_ref().unwrap();
    assert_eq!(report.diagnostics.unused_headers[0].header, "list");
}

#[test]
fn test_custom_table_substitutes_builtins() {
    let config = TestConfigBuilder::new()
        .without_defaults()
        .header("memory", &["std::unique_ptr"])
        .build();
    let a = Analyzer::from_config(&config).unwrap();

    let d = a.analyze_source("#include <memory>\nstd::unique_ptr<int> p; std::vector<int> v;\n");
    assert!(d.missing_includes.is_empty());
    assert!(d.unused_headers.is_empty());
    assert_eq!(d.unrecognized[0].symbol, "std::vector");
}
