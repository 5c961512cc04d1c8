use crate::error::{CodegenError, Result};
use crate::module_path::module_path;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use wireup_directives::Span;
use wireup_graph::{build_order, Dependency, DiConfig, GraphError};

const HEADER: &str = "// Code generated by wireup. DO NOT EDIT.\n\n";

/// Shared emission state threaded through the whole traversal
struct EmitContext {
    /// normalized module path → import alias
    imports: BTreeMap<String, Ident>,

    /// graph alias → declared local identifier
    locals: HashMap<String, Ident>,

    counter: usize,
}

impl EmitContext {
    fn new() -> Self {
        Self {
            imports: BTreeMap::new(),
            locals: HashMap::new(),
            counter: 0,
        }
    }

    /// Next unique generated identifier
    fn gen_uid(&mut self) -> Ident {
        self.counter += 1;
        format_ident!("id_{}", self.counter)
    }

    /// Import alias for a module path, allocated on first use
    fn resolve_import(&mut self, module: &str) -> Ident {
        if let Some(alias) = self.imports.get(module) {
            return alias.clone();
        }
        let alias = self.gen_uid();
        self.imports.insert(module.to_string(), alias.clone());
        alias
    }
}

/// Expression for one constructor argument.
///
/// A shared dependency borrows the already-declared local; a standalone
/// dependency becomes an inline nested constructor call, recursively
/// expanded, and never declares a top-level local of its own.
fn dependency_expr(
    ctx: &mut EmitContext,
    dep: &Dependency,
    config: &DiConfig,
) -> Result<TokenStream> {
    if dep.standalone {
        let factory = config
            .get(&dep.name)
            .ok_or_else(|| GraphError::NodeNotFound(dep.name.clone()))?;
        let module_alias = ctx.resolve_import(&factory.module);
        let function = parse_ident(&factory.function)?;

        let mut args = Vec::with_capacity(factory.deps.len());
        for sub in &factory.deps {
            args.push(dependency_expr(ctx, sub, config)?);
        }

        return Ok(quote! { #module_alias::#function(#(#args),*) });
    }

    let local = ctx
        .locals
        .get(&dep.name)
        .ok_or_else(|| GraphError::NodeNotFound(dep.name.clone()))?;
    Ok(quote! { &#local })
}

fn parse_ident(name: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name).map_err(|_| CodegenError::InvalidIdentifier(name.to_string()))
}

fn marker_for(span: &Span, root: &Path) -> String {
    let file = span.file.strip_prefix(root).unwrap_or(&span.file);
    format!(" {}:{}", file.display(), span.line)
}

/// Emit the wiring source for a validated graph.
///
/// Consumes the config: module paths are normalized in place before any
/// declaration is generated. A scheduler failure aborts emission entirely.
pub fn generate(root: &Path, identity: &str, mut config: DiConfig) -> Result<String> {
    let order = build_order(&config)?;

    // normalize module paths for all factories
    for factory in config.container.values_mut() {
        factory.module = module_path(Path::new(&factory.module), root, identity);
    }

    let mut ctx = EmitContext::new();
    let mut stmts: Vec<TokenStream> = Vec::with_capacity(order.len());
    let mut locals: Vec<Ident> = Vec::with_capacity(order.len());

    for alias in &order {
        let factory = config
            .get(alias)
            .ok_or_else(|| GraphError::NodeNotFound(alias.clone()))?
            .clone();

        let mut args = Vec::with_capacity(factory.deps.len());
        for dep in &factory.deps {
            args.push(dependency_expr(&mut ctx, dep, &config)?);
        }

        let module_alias = ctx.resolve_import(&factory.module);
        let function = parse_ident(&factory.function)?;
        let local = ctx.gen_uid();
        ctx.locals.insert(alias.clone(), local.clone());

        let marker = marker_for(&factory.span, root);
        stmts.push(quote! {
            #[doc = #marker]
            let #local = #module_alias::#function(#(#args),*);
        });
        locals.push(local);
    }

    let mark_call = if locals.is_empty() {
        TokenStream::new()
    } else {
        quote! { wireup::mark((#(#locals),*)); }
    };

    let mut use_decls: Vec<TokenStream> = Vec::with_capacity(ctx.imports.len() + 1);
    if !locals.is_empty() {
        // fixed import defining the keep-alive hook
        use_decls.push(quote! { use wireup_support as wireup; });
    }
    for (path, alias) in &ctx.imports {
        let module: syn::Path = syn::parse_str(path)?;
        use_decls.push(quote! { use #module as #alias; });
    }

    let file_tokens = quote! {
        #(#use_decls)*

        #[allow(unused_doc_comments)]
        pub fn wire() {
            #(#stmts)*
            #mark_call
        }
    };

    let ast: syn::File = syn::parse2(file_tokens)?;
    Ok(format!("{HEADER}{}", prettyplease::unparse(&ast)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wireup_directives::{Annotation, DepRef};

    fn factory(function: &str, alias: &str, file: &str, line: usize) -> Annotation {
        Annotation::Factory {
            function: function.to_string(),
            alias: alias.to_string(),
            span: Span::new(file, line),
        }
    }

    fn wire(target: &str, deps: &[(&str, bool)]) -> Annotation {
        Annotation::Wire {
            target: target.to_string(),
            deps: deps
                .iter()
                .map(|(name, standalone)| DepRef {
                    name: (*name).to_string(),
                    standalone: *standalone,
                })
                .collect(),
            span: Span::new("src/lib.rs", 1),
        }
    }

    fn example_config() -> DiConfig {
        let annotations = vec![
            factory("NewDB", "db", "/proj/src/db.rs", 2),
            factory("NewCache", "cache", "/proj/src/cache.rs", 2),
            wire("cache", &[("db", false)]),
            factory("NewServer", "server", "/proj/src/server.rs", 2),
            wire("server", &[("db", false), ("cache", true)]),
        ];
        DiConfig::from_annotations(&annotations).unwrap()
    }

    fn generate_example() -> String {
        generate(Path::new("/proj"), "acme", example_config()).unwrap()
    }

    #[test]
    fn emits_declarations_in_dependency_order() {
        let source = generate_example();

        let db = source.find("id_1::NewDB()").unwrap();
        let cache = source.find("NewCache(&id_2)").unwrap();
        let server = source.find("NewServer(").unwrap();
        assert!(db < cache);
        assert!(cache < server);
    }

    #[test]
    fn shared_deps_borrow_the_declared_local() {
        let source = generate_example();
        assert!(source.contains("let id_4 = id_3::NewCache(&id_2);"));
    }

    #[test]
    fn standalone_deps_expand_inline() {
        let source = generate_example();

        // server takes the shared db local and a fresh inline cache
        assert!(source.contains("NewServer(&id_2, id_3::NewCache(&id_2))"));
        // cache's own shared declaration still exists, referenced nowhere else
        assert_eq!(source.matches("let id_4").count(), 1);
    }

    #[test]
    fn keep_alive_consumes_every_local() {
        let source = generate_example();
        assert!(source.contains("wireup::mark((id_2, id_4, id_6));"));
    }

    #[test]
    fn imports_are_deduplicated_and_aliased() {
        let source = generate_example();

        assert!(source.contains("use acme::cache as id_3;"));
        assert!(source.contains("use acme::db as id_1;"));
        assert!(source.contains("use acme::server as id_5;"));
        assert!(source.contains("use wireup_support as wireup;"));
        // cache's module is referenced twice but imported once
        assert_eq!(source.matches("use acme::cache").count(), 1);
    }

    #[test]
    fn declarations_carry_source_markers() {
        let source = generate_example();
        assert!(source.contains("src/db.rs:2"));
        assert!(source.contains("src/server.rs:2"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = generate(Path::new("/proj"), "acme", example_config()).unwrap();
        let second = generate(Path::new("/proj"), "acme", example_config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn final_dependency_aborts_before_emission() {
        let annotations = vec![
            factory("NewDB", "db", "/proj/src/db.rs", 2),
            factory("NewCache", "cache", "/proj/src/cache.rs", 2),
            wire("cache", &[("db", false)]),
            Annotation::Final {
                target: "db".to_string(),
                span: Span::new("/proj/src/db.rs", 3),
            },
        ];
        let config = DiConfig::from_annotations(&annotations).unwrap();

        let err = generate(Path::new("/proj"), "acme", config).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::GraphError(GraphError::FinalAsDependency { .. })
        ));
    }

    #[test]
    fn final_nodes_are_emitted_last() {
        let annotations = vec![
            factory("NewDB", "db", "/proj/src/db.rs", 2),
            factory("NewReport", "report", "/proj/src/report.rs", 2),
            wire("report", &[("db", false)]),
            Annotation::Final {
                target: "report".to_string(),
                span: Span::new("/proj/src/report.rs", 3),
            },
        ];
        let config = DiConfig::from_annotations(&annotations).unwrap();
        let source = generate(Path::new("/proj"), "acme", config).unwrap();

        let db = source.find("NewDB").unwrap();
        let report = source.find("NewReport").unwrap();
        assert!(db < report);
    }

    #[test]
    fn invalid_function_name_is_a_render_error() {
        let annotations = vec![factory("not an ident", "db", "/proj/src/db.rs", 2)];
        let config = DiConfig::from_annotations(&annotations).unwrap();

        let err = generate(Path::new("/proj"), "acme", config).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidIdentifier(_)));
    }

    #[test]
    fn empty_graph_emits_an_empty_entry_routine() {
        let source = generate(Path::new("/proj"), "acme", DiConfig::new()).unwrap();

        assert!(source.contains("pub fn wire()"));
        assert!(!source.contains("mark"));
    }
}
