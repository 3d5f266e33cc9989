// Home-models grid: search and filters, against the live site.
//
// Run with: cargo test -p braustin-e2e --test all_models_test -- --ignored
//
// Count assertions are relative (filtered < initial) rather than absolute,
// since inventory changes week to week.

mod common;

use braustin_e2e::pages::AllModelsPage;
use braustin_e2e::Fixture;
use common::{assert_url_contains, settle, with_fixture};

async fn open_grid(fixture: &Fixture) -> anyhow::Result<AllModelsPage> {
    let grid = fixture.all_models_page();
    grid.goto().await?;
    grid.base().wait_for_page_load().await;
    Ok(grid)
}

async fn populated_count(grid: &AllModelsPage) -> anyhow::Result<usize> {
    let count = grid.results_count().await?;
    anyhow::ensure!(count > 0, "expected the grid to render home cards");
    Ok(count)
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn header_menu_reaches_the_grid() {
    with_fixture("grid-via-header-menu", |fx| async move {
        let grid = fx.all_models_page();
        grid.base().navigate("/").await?;
        grid.base().wait_for_page_load().await;

        grid.header().homes_button().hover().await?;
        grid.header().all_models().click().await?;
        settle(fx.page()).await;

        assert_url_contains(fx.page(), "/shop/all-models").await
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn search_filters_homes_by_name() {
    with_fixture("search-by-name", |fx| async move {
        let grid = open_grid(&fx).await?;
        let search_term = "Clayton Tempo";

        let initial_count = populated_count(&grid).await?;

        grid.base().search(search_term).await?;
        grid.wait_for_filters().await;

        let filtered_count = grid.results_count().await?;
        anyhow::ensure!(
            filtered_count < initial_count,
            "search should narrow the grid ({filtered_count} vs {initial_count})"
        );

        for title in grid.card_titles().await? {
            anyhow::ensure!(
                title.to_lowercase().contains(&search_term.to_lowercase()),
                "unexpected card in results: {title}"
            );
        }
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn invalid_search_returns_no_results() {
    with_fixture("search-invalid-term", |fx| async move {
        let grid = open_grid(&fx).await?;
        populated_count(&grid).await?;

        grid.base().search("myInvalidSearchTerm").await?;
        grid.wait_for_filters().await;

        let filtered_count = grid.results_count().await?;
        anyhow::ensure!(
            filtered_count == 0,
            "expected no results, got {filtered_count}"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn clearing_the_search_restores_all_results() {
    with_fixture("search-clear-restores", |fx| async move {
        let grid = open_grid(&fx).await?;
        let initial_count = populated_count(&grid).await?;

        grid.base().search("Clayton Tempo").await?;
        grid.wait_for_filters().await;

        grid.base().search("").await?;
        grid.wait_for_filters().await;

        let final_count = grid.results_count().await?;
        anyhow::ensure!(
            final_count == initial_count,
            "expected {initial_count} cards after clearing, got {final_count}"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn section_filters_narrow_the_grid() {
    with_fixture("section-filters", |fx| async move {
        let grid = open_grid(&fx).await?;

        let initial_count = populated_count(&grid).await?;
        grid.section_single().click().await?;
        grid.wait_for_filters().await;

        let single_count = populated_count(&grid).await?;
        anyhow::ensure!(single_count < initial_count, "single-section should narrow");
        grid.reset_filters().await?;

        grid.section_multi().click().await?;
        grid.wait_for_filters().await;

        let multi_count = populated_count(&grid).await?;
        anyhow::ensure!(multi_count < initial_count, "multi-section should narrow");
        anyhow::ensure!(
            single_count + multi_count >= initial_count,
            "sections should cover the unfiltered grid"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn bedroom_filters_narrow_the_grid() {
    with_fixture("bedroom-filters", |fx| async move {
        let grid = open_grid(&fx).await?;

        for bedrooms in 1..=5 {
            let initial_count = populated_count(&grid).await?;
            grid.filter_by_bedrooms(bedrooms).await?;

            let filtered_count = grid.results_count().await?;
            anyhow::ensure!(
                filtered_count < initial_count,
                "{bedrooms}-bedroom filter should narrow ({filtered_count} vs {initial_count})"
            );
            grid.reset_filters().await?;
        }
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn bathroom_filters_narrow_the_grid() {
    with_fixture("bathroom-filters", |fx| async move {
        let grid = open_grid(&fx).await?;

        for bathrooms in 1..=3 {
            let initial_count = populated_count(&grid).await?;
            grid.filter_by_bathrooms(bathrooms).await?;

            let filtered_count = grid.results_count().await?;
            anyhow::ensure!(
                filtered_count < initial_count,
                "{bathrooms}-bathroom filter should narrow ({filtered_count} vs {initial_count})"
            );
            grid.reset_filters().await?;
        }
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn estimated_payment_range_filters_the_grid() {
    with_fixture("estimated-payment-range", |fx| async move {
        let grid = open_grid(&fx).await?;

        // Valid range narrows the grid.
        let initial_count = populated_count(&grid).await?;
        grid.select_estimated_payment_from("$1000").await?;
        grid.select_estimated_payment_to("$2400").await?;
        let filtered_count = populated_count(&grid).await?;
        anyhow::ensure!(filtered_count < initial_count, "range should narrow");
        grid.reset_filters().await?;

        // Degenerate range matches nothing.
        grid.select_estimated_payment_from("$2400").await?;
        grid.select_estimated_payment_to("$2400").await?;
        anyhow::ensure!(
            grid.no_items_match().is_visible().await?,
            "expected the no-items banner"
        );
        grid.reset_filters().await?;

        // The top of the range excludes the premium manufacturer.
        grid.select_estimated_payment_from("$2000").await?;
        grid.select_estimated_payment_to("$2400").await?;
        for title in grid.card_titles().await? {
            anyhow::ensure!(
                !title.contains("Clayton"),
                "no Clayton homes expected in $2000-$2400: {title}"
            );
        }
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn size_range_filters_the_grid() {
    with_fixture("size-range", |fx| async move {
        let grid = open_grid(&fx).await?;

        let initial_count = populated_count(&grid).await?;
        grid.select_size_from("1000").await?;
        grid.select_size_to("2000").await?;
        let filtered_count = populated_count(&grid).await?;
        anyhow::ensure!(filtered_count < initial_count, "size range should narrow");
        grid.reset_filters().await?;

        grid.select_size_from("2500").await?;
        grid.select_size_to("2500").await?;
        anyhow::ensure!(
            grid.no_items_match().is_visible().await?,
            "expected the no-items banner"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn dimension_filters_narrow_the_grid() {
    with_fixture("dimension-filters", |fx| async move {
        let grid = open_grid(&fx).await?;

        let initial_count = populated_count(&grid).await?;
        grid.select_max_width("16").await?;
        grid.select_max_length("76").await?;
        let filtered_count = populated_count(&grid).await?;
        anyhow::ensure!(filtered_count < initial_count, "dimensions should narrow");
        grid.reset_filters().await?;

        // A 14x40 footprint is below the smallest model.
        grid.select_max_width("14").await?;
        grid.select_max_length("40").await?;
        anyhow::ensure!(
            grid.no_items_match().is_visible().await?,
            "expected the no-items banner"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore = "requires Chrome and access to braustin.com"]
async fn manufacturer_filters_return_only_that_manufacturer() {
    with_fixture("manufacturer-filters", |fx| async move {
        let grid = open_grid(&fx).await?;

        for manufacturer in ["Clayton", "TRU", "Oak Creek"] {
            let initial_count = populated_count(&grid).await?;
            grid.filter_by_manufacturer(manufacturer).await?;

            let filtered_count = populated_count(&grid).await?;
            anyhow::ensure!(
                filtered_count < initial_count,
                "{manufacturer} filter should narrow"
            );
            for title in grid.card_titles().await? {
                anyhow::ensure!(
                    title.contains(manufacturer),
                    "{manufacturer} filter returned: {title}"
                );
            }
            grid.reset_filters().await?;
        }
        Ok(())
    })
    .await;
}
