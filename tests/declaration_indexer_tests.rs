use costlens::declarations::{index_declarations, DeclarationIndexer, GenericBounds, HeuristicIndexer};
use costlens::OccurrenceKey;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_indexing_twice_is_identical() {
    let source = indoc! {"
        public class Inventory {
            private final List<Item> items = new ArrayList<>();

            public int count() {
                return items.size();
            }

            public Item find(String name, int from) {
                for (Item item : items) {
                    if (item.matches(name)) {
                        return item;
                    }
                }
                return null;
            }
        }
    "};

    let first = index_declarations(source);
    let second = index_declarations(source);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_occurrence_indices_for_overloads() {
    let source = indoc! {"
        class C {
            void foo() {}
            int bar(int x) { return x; }
            void foo(String s) {}
        }
    "};

    let keys: Vec<OccurrenceKey> = index_declarations(source)
        .iter()
        .map(|d| d.occurrence_key())
        .collect();
    assert_eq!(
        keys,
        vec![
            OccurrenceKey::new("foo", 0),
            OccurrenceKey::new("bar", 0),
            OccurrenceKey::new("foo", 1),
        ]
    );
}

#[test]
fn test_class_generic_bound_resolves_parameter() {
    let decls = index_declarations("class C<T extends Number> { void m(T x) {} }");
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].name, "m");
    assert_eq!(decls[0].parameter_types, vec!["Number"]);
}

#[test]
fn test_varargs_become_arrays() {
    let decls = index_declarations(indoc! {"
        class Main {
            public static void main(String... args) {
            }
        }
    "});
    assert_eq!(decls[0].parameter_types, vec!["String[]"]);
    assert_eq!(decls[0].signature(), "main(String[])");
}

#[test]
fn test_parameter_details_are_normalized() {
    let decls = index_declarations(indoc! {"
        interface Store<K extends Comparable<K>, V> {
            void putAll(final Map<K, V> entries, @Nullable K[] order, int... weights);
        }
    "});
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].parameter_types, vec!["Map", "Comparable[]", "int[]"]);
}

#[test]
fn test_multiline_header_range() {
    let source = indoc! {"
        class Report {
            public String render(
                    int width,
                    int height) {
                return \"\";
            }
        }
    "};
    let decls = index_declarations(source);
    assert_eq!(decls.len(), 1);
    let decl = &decls[0];
    assert_eq!(decl.declaration_range.start.line, 1);
    assert!(decl.declaration_range.end.line >= 3);
    assert!(decl.declaration_range.is_multiline());
    assert_eq!(decl.name_range.start.line, 1);
    assert_eq!(decl.parameter_types, vec!["int", "int"]);
}

#[test]
fn test_control_flow_and_calls_are_not_declarations() {
    let source = indoc! {"
        class Loop {
            void run(int n) {
                if (n > 0) {
                    process(n);
                }
                while (n-- > 0) {
                    step();
                }
                return compute(n);
            }
        }
    "};
    let names: Vec<String> = index_declarations(source)
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["run"]);
}

#[test]
fn test_constructor_with_modifier_is_skipped() {
    let source = indoc! {"
        class Account {
            public Account(int id) {
            }

            public int id() {
                return 0;
            }
        }
    "};
    let names: Vec<String> = index_declarations(source)
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["id"]);
}

#[test]
fn test_supplied_bounds_are_used_when_text_lacks_them() {
    let indexer = HeuristicIndexer::with_bounds(GenericBounds::from_clause("E extends Event"));
    let decls = indexer.index("  void publish(E event) {}\n");
    assert_eq!(decls[0].parameter_types, vec!["Event"]);
}

#[test]
fn test_text_without_methods_yields_nothing() {
    assert!(index_declarations("").is_empty());
    assert!(index_declarations("just some words ( ) {").is_empty());
    assert!(index_declarations("class Empty {}\n").is_empty());
}
