//! Property tests for tallies and chain resolution against the built-in catalog.

use craftplan_crafting::prelude::*;
use proptest::prelude::*;

fn arb_item() -> impl Strategy<Value = ItemType> {
    prop::sample::select(ItemType::all().to_vec())
}

fn arb_tally() -> impl Strategy<Value = ItemTally> {
    prop::collection::vec((arb_item(), 0u32..40), 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_snapshot() -> impl Strategy<Value = InventorySnapshot> {
    prop::collection::vec((0usize..16, arb_item(), 1u32..30), 0..8).prop_map(|stacks| {
        InventorySnapshot::from_slots(
            stacks
                .into_iter()
                .map(|(slot, item, count)| (slot, ItemStack::new(item, count))),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A craftable item already held needs no steps; a raw one is listed alone.
    #[test]
    fn in_stock_target_resolves_empty(
        item in arb_item(),
        extra in 0u32..10,
        mut stock in arb_tally(),
    ) {
        stock.set(item, 1 + extra);
        let steps = get_recipe_product_chain(item, &stock);
        if RecipeCatalog::builtin().contains(item) {
            prop_assert!(steps.is_empty());
        } else {
            prop_assert_eq!(steps, vec![ProductInfo::new(item, 1)]);
        }
    }

    /// Craftable targets that are short lead the chain with one unit.
    #[test]
    fn chain_starts_with_target(item in arb_item(), stock in arb_tally()) {
        let steps = get_recipe_product_chain(item, &stock);
        if stock.count(item) == 0 {
            prop_assert_eq!(steps.first().copied(), Some(ProductInfo::new(item, 1)));
        }
    }

    /// Raw resources are terminal: nothing follows from them in the catalog.
    #[test]
    fn raw_steps_match_raw_requirements(item in arb_item(), stock in arb_tally()) {
        let catalog = RecipeCatalog::builtin();
        let resolution = ChainResolver::new(catalog).resolve_detailed(item, &stock);

        let listed_raw: ItemTally = resolution
            .steps
            .iter()
            .filter(|step| !catalog.contains(step.item))
            .map(|step| (step.item, step.amount_required))
            .collect();
        prop_assert_eq!(&listed_raw, &resolution.raw_requirements);

        for (raw, _) in resolution.raw_requirements.iter() {
            prop_assert!(catalog.get_item_recipe(raw).is_none());
        }
    }

    /// Skipping raw resources only removes raw steps.
    #[test]
    fn skip_raw_keeps_crafted_steps(item in arb_item(), stock in arb_tally()) {
        let catalog = RecipeCatalog::builtin();
        let full = ChainResolver::new(catalog).resolve(item, &stock);
        let crafted_only = ChainResolver::new(catalog)
            .skip_raw_resources(true)
            .resolve(item, &stock);

        let expected: Vec<_> = full
            .into_iter()
            .filter(|step| catalog.contains(step.item))
            .collect();
        prop_assert_eq!(crafted_only, expected);
    }

    /// Resolution works on a copy of the caller's stock.
    #[test]
    fn caller_tally_untouched(item in arb_item(), stock in arb_tally()) {
        let before = stock.clone();
        let _ = get_recipe_product_chain(item, &stock);
        prop_assert_eq!(stock, before);
    }

    /// Ledger never gains stock; every crafted step is debited.
    #[test]
    fn ledger_only_decreases(item in arb_item(), stock in arb_tally()) {
        let resolution =
            ChainResolver::new(RecipeCatalog::builtin()).resolve_detailed(item, &stock);
        for (entry, remaining) in resolution.ledger.iter() {
            prop_assert!(remaining <= i64::from(stock.count(entry)));
        }
    }

    /// The sufficiency check agrees with per-item sums across snapshots.
    #[test]
    fn has_enough_items_matches_sums(
        snapshots in prop::collection::vec(arb_snapshot(), 0..4),
        required in arb_tally(),
    ) {
        let expected = required.iter().all(|(item, needed)| {
            let held: u32 = snapshots
                .iter()
                .flat_map(InventorySnapshot::stacks)
                .filter(|stack| stack.item == item)
                .map(|stack| stack.count)
                .sum();
            held >= needed
        });
        prop_assert_eq!(has_enough_items(&snapshots, &required), expected);
    }
}

#[test]
fn workbench_scenarios() {
    let plenty = ItemTally::from([(ItemType::Wood, 20)]);
    assert_eq!(
        get_recipe_product_chain(ItemType::Workbench, &plenty),
        vec![
            ProductInfo::new(ItemType::Workbench, 1),
            ProductInfo::new(ItemType::Wood, 15),
        ]
    );

    let short = ItemTally::from([(ItemType::Wood, 10)]);
    assert_eq!(
        get_recipe_product_chain(ItemType::Workbench, &short),
        vec![
            ProductInfo::new(ItemType::Workbench, 1),
            ProductInfo::new(ItemType::Wood, 15),
        ]
    );

    let built = ItemTally::from([(ItemType::Workbench, 1)]);
    assert!(get_recipe_product_chain(ItemType::Workbench, &built).is_empty());
}

#[test]
fn lantern_chain_from_nothing() {
    let catalog = RecipeCatalog::builtin();
    let resolution =
        ChainResolver::new(catalog).resolve_detailed(ItemType::Lantern, &ItemTally::new());

    let items: Vec<_> = resolution.steps.iter().map(|step| step.item).collect();
    assert_eq!(
        &items[..5],
        &[
            ItemType::Lantern,
            ItemType::IronIngot,
            ItemType::Glass,
            ItemType::Torch,
            ItemType::CopperWire,
        ]
    );
    assert_eq!(resolution.raw_requirements.get(ItemType::Coal), Some(3));
    assert_eq!(resolution.ledger.get(ItemType::Lantern), Some(-1));
    assert!(resolution.crafted_steps(catalog).count() >= 7);
}
