//! Tests for routing raw step arguments through the transform registry.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use steparg::{
    ArgumentTransformer, NastyCatalogue, StepArgument, TransformKind, TransformRegistry,
    TransformRoute,
};
use test_support::{fixture_catalogue, table};

#[fixture]
fn catalogue() -> NastyCatalogue {
    fixture_catalogue()
}

#[fixture]
fn registry() -> TransformRegistry {
    TransformRegistry::default()
}

#[rstest]
fn standard_routes_are_declared_in_order(registry: TransformRegistry) {
    let kinds: Vec<_> = registry.routes().iter().map(TransformRoute::kind).collect();
    assert_eq!(
        kinds,
        [
            TransformKind::UnescapeQuotes,
            TransformKind::NastyStrings,
            TransformKind::Table,
        ]
    );
}

#[rstest]
#[case(r#"He said \"hi\""#, r#"He said "hi""#)]
#[case("$NASTYSTRING2", "<script>")]
#[case("$NASTYSTRING10 items", "ten items")]
#[case("no special chars here", "no special chars here")]
#[case(r#"\"$NASTYSTRING2\""#, r#""$NASTYSTRING2""#)]
fn text_arguments_take_the_first_matching_route(
    registry: TransformRegistry,
    catalogue: NastyCatalogue,
    #[case] raw: &str,
    #[case] expected: &str,
) -> Result<()> {
    let transformer = ArgumentTransformer::new(&catalogue);
    let output = registry.transform(&transformer, StepArgument::from(raw))?;
    let text = output.as_text().context("text argument should stay text")?;
    ensure!(text == expected, "{raw:?} routed to {text:?}, expected {expected:?}");
    Ok(())
}

#[rstest]
fn table_arguments_use_the_table_pipeline(
    registry: TransformRegistry,
    catalogue: NastyCatalogue,
) -> Result<()> {
    let input = table(&[&["field", "value"], &[r#"\"x\""#, "$NASTYSTRING1"]]);
    let transformer = ArgumentTransformer::new(&catalogue);
    let output = registry.transform(&transformer, StepArgument::Table(input))?;
    let routed = output.as_table().context("table argument should stay a table")?;
    let rows = routed.hashes();
    let row = rows.first().context("one data row")?;
    ensure!(row.get("field") == Some(&r#""x""#));
    ensure!(row.get("value") == Some(&"'; DROP TABLE users; --"));
    Ok(())
}

#[rstest]
fn custom_table_route_can_target_a_header(catalogue: NastyCatalogue) -> Result<()> {
    let route = TransformRoute::new(TransformKind::Table, r"^table:username,password$")?;
    let registry = TransformRegistry::empty().with_route(route);
    let transformer = ArgumentTransformer::new(&catalogue);

    let login = table(&[&["username", "password"], &["admin", "$NASTYSTRING2"]]);
    let routed = registry.transform(&transformer, StepArgument::from(login))?;
    ensure!(routed.as_table().and_then(|t| t.cell(1, 1)) == Some("<script>"));

    let other = table(&[&["name"], &["$NASTYSTRING2"]]);
    let untouched = registry.transform(&transformer, StepArgument::from(other))?;
    ensure!(untouched.as_table().and_then(|t| t.cell(1, 0)) == Some("$NASTYSTRING2"));
    Ok(())
}

#[rstest]
fn routing_failure_propagates(registry: TransformRegistry) {
    let catalogue = NastyCatalogue::new();
    let transformer = ArgumentTransformer::new(&catalogue);
    let result = registry.transform(&transformer, StepArgument::from("$NASTYSTRING1"));
    assert!(result.is_err(), "empty catalogue should fail: {result:?}");
}
