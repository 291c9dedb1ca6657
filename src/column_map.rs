//! Column-name dictionaries for the three naming schemes.
//!
//! Ad-platform exports arrive with human-readable labels ("Ad Set Name",
//! "Amount Spent (USD)"); the pipeline works on a standardized snake_case
//! English schema; published reports carry Portuguese column names. Renaming
//! is best-effort in every direction: names missing from a dictionary survive
//! unchanged, so partial tables and already-renamed tables are both safe
//! inputs.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::Table;

/// Standard English column keys used across the pipeline.
pub mod standard {
    /// Free-text ad-set name; input to campaign-goal derivation.
    pub const AD_SET_NAME: &str = "ad_set_name";
    /// Country identifier (name or ISO alpha-2 code).
    pub const COUNTRY: &str = "country";
    /// Campaign results count.
    pub const RESULTS: &str = "results";
    /// Purchase count.
    pub const PURCHASE: &str = "purchase";
    /// Revenue attributed to purchases.
    pub const PURCHASE_CONVERSION_VALUE: &str = "purchase_conversion_value";
    /// Ad spend.
    pub const AMOUNT_SPENT: &str = "amount_spent";

    /// Derived: fine-grained campaign goal label.
    pub const CAMPAIGN_GOAL: &str = "campaign_goal";
    /// Derived: coarse classification of [`CAMPAIGN_GOAL`].
    pub const CLASSIFIED_CAMPAIGN_GOAL: &str = "classified_campaign_goal";

    /// Enrichment: country population.
    pub const COUNTRY_POPULATION: &str = "country_population";
    /// Enrichment: GDP per capita.
    pub const GDP_PER_CAPITA: &str = "gdp_per_capita";
    /// Enrichment: full country name.
    pub const FULL_COUNTRY_NAME: &str = "full_country_name";

    /// Aggregate output: rows per group.
    pub const COUNT: &str = "count";
    /// Aggregate output: group share of total results.
    pub const PCT_RESULTS: &str = "pct_results";
    /// Aggregate output: group share of total purchases.
    pub const PCT_PURCHASE: &str = "pct_purchase";
    /// Aggregate output: group share of total conversion value.
    pub const PCT_PURCHASE_CONVERSION_VALUE: &str = "pct_purchase_conversion_value";
    /// Aggregate output: group share of total spend.
    pub const PCT_AMOUNT_SPENT: &str = "pct_amount_spent";
    /// Aggregate output: group share of total row count.
    pub const PCT_COUNT: &str = "pct_count";
}

static RAW_TO_STANDARD: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Ad Set Name", standard::AD_SET_NAME),
        ("Age", "age"),
        ("Result Rate", "result_rate"),
        ("Result Indicator", "result_indicator"),
        ("Results", standard::RESULTS),
        ("Reach", "reach"),
        ("Frequency", "frequency"),
        ("Link Clicks", "links_clicks"),
        ("CPC (Link) (USD)", "cpc_link"),
        ("CPC (All) (USD)", "cpc_general"),
        ("Cost per 1,000 People Reached (USD)", "cost_per_1000_people_reached"),
        ("CTR (All)", "ctr"),
        ("Add to Cart (Facebook Pixel)", "add_to_cart"),
        ("Cost per Add To Cart (Facebook Pixel) (USD)", "cost_per_add_to_cart"),
        ("Initiate Checkout (Facebook Pixel)", "initiate_checkout"),
        (
            "Cost per Initiate Checkout (Facebook Pixel) (USD)",
            "cost_per_initiate_checkout",
        ),
        ("Purchase (Facebook Pixel)", standard::PURCHASE),
        ("Cost per Purchase (Facebook Pixel) (USD)", "cost_per_purchase"),
        ("Amount Spent (USD)", standard::AMOUNT_SPENT),
        (
            "Purchase Conversion Value (Facebook Pixel)",
            standard::PURCHASE_CONVERSION_VALUE,
        ),
        ("Country", standard::COUNTRY),
        ("Platform", "platform"),
    ])
});

static EN_TO_PT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (standard::AD_SET_NAME, "nome_do_conjunto_de_anuncios"),
        ("age", "idade"),
        ("result_rate", "taxa_de_resultado"),
        ("result_indicator", "indicador_de_resultado"),
        (standard::RESULTS, "resultados"),
        ("reach", "alcance"),
        ("frequency", "frequencia"),
        ("links_clicks", "cliques_no_link"),
        ("cpc_link", "custo_por_clique_no_link"),
        ("cpc_general", "custo_por_clique_geral"),
        ("cost_per_1000_people_reached", "custo_por_1000_pessoas_alcancadas"),
        ("ctr", "ctr"),
        ("add_to_cart", "adicionar_ao_carrinho"),
        ("cost_per_add_to_cart", "custo_por_adicionar_ao_carrinho"),
        ("initiate_checkout", "iniciar_finalizacao_da_compra"),
        ("cost_per_initiate_checkout", "custo_por_iniciar_finalizacao_da_compra"),
        (standard::PURCHASE, "compra"),
        ("cost_per_purchase", "custo_por_compra"),
        (standard::AMOUNT_SPENT, "valor_gasto"),
        (standard::PURCHASE_CONVERSION_VALUE, "valor_conversao_compra"),
        (standard::COUNTRY, "pais"),
        ("platform", "plataforma"),
        (standard::CAMPAIGN_GOAL, "objetivo_da_campanha"),
        (standard::CLASSIFIED_CAMPAIGN_GOAL, "objetivo_classificado_da_campanha"),
        ("qty_ad_sets", "quantidade_de_campanhas"),
        ("conversion_rate", "taxa_de_conversao"),
        ("cart_to_checkout_conversion", "conversao_carrinho_checkout"),
        ("checkout_to_purchase_conversion", "conversao_checkout_compra"),
        (standard::GDP_PER_CAPITA, "pib_per_capita"),
        (standard::FULL_COUNTRY_NAME, "nome_completo_do_pais"),
        (standard::COUNTRY_POPULATION, "populacao_do_pais"),
        ("reach_to_purchase_conversion", "conversao_alcance_compra"),
    ])
});

static PT_TO_EN: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EN_TO_PT.iter().map(|(en, pt)| (*pt, *en)).collect());

/// Direction for [`localize_columns`].
///
/// The direction names say where the table is *going*: `ToPortuguese` applies
/// the English→Portuguese dictionary, `ToEnglish` the reversed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameDirection {
    /// Standard English keys → Portuguese report names.
    ToPortuguese,
    /// Portuguese report names → standard English keys.
    ToEnglish,
}

/// Rename raw export labels to the standard English schema, in place.
///
/// Unmapped columns are left unchanged.
pub fn to_standard_english(table: &mut Table) {
    rename_with(table, &RAW_TO_STANDARD);
}

/// Rename between the standard English schema and the Portuguese report
/// schema, in place, in the given direction.
///
/// Unmapped columns are left unchanged, so a round trip restores exactly the
/// names it mapped and never disturbs the rest.
pub fn localize_columns(table: &mut Table, direction: RenameDirection) {
    match direction {
        RenameDirection::ToPortuguese => rename_with(table, &EN_TO_PT),
        RenameDirection::ToEnglish => rename_with(table, &PT_TO_EN),
    }
}

fn rename_with(table: &mut Table, mapping: &HashMap<&str, &str>) {
    for name in table.columns.iter_mut() {
        if let Some(mapped) = mapping.get(name.as_str()) {
            *name = (*mapped).to_string();
        }
    }
}
