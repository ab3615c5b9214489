//! Walk, shallow and deep resolution over on-disk store trees.

use anyhow::Result;
use jsp_insights::config::LayoutConfig;
use jsp_insights::graph::inspect::{flatten, has_circular, included_from};
use jsp_insights::graph::{GraphSummary, IncludedBy};
use jsp_insights::test_utils::{CorpusFixture, init_test_logging};

use crate::common::{child_paths, resolve, tree};

#[tokio::test]
async fn test_sample_corpus_resolution() -> Result<()> {
    init_test_logging(None);
    let corpus = CorpusFixture::sample()?;
    let (shallow, deep) = resolve(&corpus).await?;

    let cart = corpus.page_key("USBC/Cart.jsp");
    let header = corpus.page_key("USBC/include/Header.jspf");
    let footer = corpus.page_key("USBC/include/Footer.jspf");
    let logo = corpus.page_key("companyGLOBALSAS/include/Logo.jsp");

    // Shallow nodes keep the unresolvable reference; deep trees drop it.
    let cart_node = shallow.iter().find(|node| node.path == cart).unwrap();
    assert_eq!(
        cart_node.nested,
        vec![header.clone(), footer.clone(), corpus.page_key("Missing.jsp")]
    );

    let cart_tree = tree(&deep, &cart);
    assert_eq!(child_paths(cart_tree), vec![header.as_str(), footer.as_str()]);

    let header_occurrence = &cart_tree.nested[0];
    assert_eq!(child_paths(header_occurrence), vec![logo.as_str(), cart.as_str()]);

    let cycle = &header_occurrence.nested[1];
    assert_eq!(cycle.depth, 2);
    assert!(cycle.nested.is_empty());
    let marker = cycle.circular.as_ref().unwrap();
    assert_eq!(marker.first_included_depth, 0);
    assert_eq!(
        marker.last_included_by,
        IncludedBy {
            path: header.clone(),
            depth: 1,
        }
    );
    assert_eq!(cycle.raw_nested.as_ref(), Some(&cart_node.nested));

    let footer_occurrence = &cart_tree.nested[1];
    assert_eq!(child_paths(footer_occurrence), vec![logo.as_str()]);

    let logo_tree = tree(&deep, &logo);
    assert!(logo_tree.nested.is_empty());
    assert!(!has_circular(logo_tree));
    Ok(())
}

#[tokio::test]
async fn test_every_occurrence_satisfies_depth_invariant() -> Result<()> {
    let corpus = CorpusFixture::sample()?;
    let (_, deep) = resolve(&corpus).await?;

    for root in &deep {
        let occurrences = flatten(root);
        assert_eq!(occurrences[0].depth, 0);
        assert!(occurrences[0].parent.is_none());

        for window in occurrences.windows(2) {
            let next = window[1];
            assert!(next.depth >= 1);
            assert!(next.parent.is_some());
            assert!(next.depth <= window[0].depth + 1);
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_shared_include_is_reached_from_each_parent() -> Result<()> {
    let corpus = CorpusFixture::sample()?;
    let (_, deep) = resolve(&corpus).await?;

    let logo = corpus.page_key("companyGLOBALSAS/include/Logo.jsp");
    let header = corpus.page_key("USBC/include/Header.jspf");
    let footer = corpus.page_key("USBC/include/Footer.jspf");

    let cart_tree = tree(&deep, &corpus.page_key("USBC/Cart.jsp"));
    let parents: Vec<Option<&str>> = flatten(cart_tree)
        .into_iter()
        .filter(|occurrence| occurrence.path == logo)
        .map(|occurrence| occurrence.parent)
        .collect();
    assert_eq!(parents, vec![Some(header.as_str()), Some(footer.as_str())]);

    // Cart is only ever included by Header.
    let cart_inclusions = included_from(&deep, &corpus.page_key("USBC/Cart.jsp"));
    assert!(!cart_inclusions.is_empty());
    assert!(cart_inclusions.iter().all(|o| o.parent == Some(header.as_str())));
    Ok(())
}

#[tokio::test]
async fn test_multi_store_reference_expands_to_every_variant() -> Result<()> {
    let corpus = CorpusFixture::new()?;
    corpus.add_page(
        "Misc/Landing.jsp",
        r#"<jsp:include page="${jspEsitesStoreDir}/common/header.jsp"/>"#,
    )?;

    let variants = LayoutConfig::default().store_variants;
    for variant in &variants[..2] {
        corpus.add_page(&format!("{variant}/common/header.jsp"), "")?;
    }

    let (shallow, deep) = resolve(&corpus).await?;
    let landing = corpus.page_key("Misc/Landing.jsp");

    let landing_node = shallow.iter().find(|node| node.path == landing).unwrap();
    let expected: Vec<String> = variants
        .iter()
        .map(|variant| corpus.page_key(&format!("{variant}/common/header.jsp")))
        .collect();
    assert_eq!(landing_node.nested, expected);

    // Only the variants present on disk survive deep resolution.
    let landing_tree = tree(&deep, &landing);
    assert_eq!(
        child_paths(landing_tree),
        vec![expected[0].as_str(), expected[1].as_str()]
    );
    Ok(())
}

#[tokio::test]
async fn test_placeholder_references_are_ignored() -> Result<()> {
    let corpus = CorpusFixture::new()?;
    corpus.add_page(
        "USBC/Product.jsp",
        r#"<jsp:include page="/Widgets/${richMediaFileParam}.jsp"/>
<jsp:include page="${jsp_name}.jsp"/>
<jsp:include page="Body.jsp"/>"#,
    )?;
    corpus.add_page("USBC/Body.jsp", "")?;

    let (shallow, _) = resolve(&corpus).await?;
    let product = shallow
        .iter()
        .find(|node| node.path == corpus.page_key("USBC/Product.jsp"))
        .unwrap();
    assert_eq!(product.nested, vec![corpus.page_key("USBC/Body.jsp")]);
    Ok(())
}

#[tokio::test]
async fn test_shallow_collection_is_sorted_case_insensitively() -> Result<()> {
    let corpus = CorpusFixture::new()?;
    for name in ["b.jsp", "C.jsp", "a.jspf", "D.JSP"] {
        corpus.add_page(&format!("USBC/{name}"), "")?;
    }
    corpus.add_page("USBC/notes.txt", "not a page")?;

    let (shallow, deep) = resolve(&corpus).await?;
    let names: Vec<&str> = shallow.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(names, vec!["a.jspf", "b.jsp", "C.jsp", "D.JSP"]);
    assert_eq!(deep.len(), shallow.len());
    Ok(())
}

#[tokio::test]
async fn test_summary_over_sample_corpus() -> Result<()> {
    let corpus = CorpusFixture::sample()?;
    let (shallow, deep) = resolve(&corpus).await?;
    let summary = GraphSummary::from_graph(&shallow, &deep);

    assert_eq!(summary.pages, 4);
    assert_eq!(summary.references, 6);
    assert_eq!(summary.unresolved, 1);
    // Cart and Header both reach the Cart <-> Header cycle.
    assert_eq!(summary.circular_trees, 2);
    Ok(())
}

#[tokio::test]
async fn test_self_including_page_expands_once_on_disk() -> Result<()> {
    let corpus = CorpusFixture::new()?;
    corpus.add_page("USBC/Loop.jspf", r#"<%@ include file="Loop.jspf" %>"#)?;

    let (_, deep) = resolve(&corpus).await?;
    let page = corpus.page_key("USBC/Loop.jspf");
    let root = tree(&deep, &page);

    let again = &root.nested[0];
    assert!(again.circular.is_none());
    assert_eq!(child_paths(again), vec![page.as_str()]);

    let cut = &again.nested[0];
    assert_eq!(cut.depth, 2);
    let marker = cut.circular.as_ref().unwrap();
    assert_eq!(marker.first_included_depth, 0);
    assert_eq!(marker.last_included_by, IncludedBy { path: page.clone(), depth: 1 });
    Ok(())
}
