use garland_pricing::*;
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL)
}

fn size() -> impl Strategy<Value = Size> {
    proptest::sample::select(Size::ALL)
}

fn material() -> impl Strategy<Value = Material> {
    proptest::sample::select(Material::ALL)
}

fn add_on() -> impl Strategy<Value = AddOn> {
    proptest::sample::select(AddOn::ALL)
}

fn add_on_set() -> impl Strategy<Value = AddOnSet> {
    proptest::collection::vec(add_on(), 0..=AddOn::COUNT)
        .prop_map(|v| v.into_iter().collect())
}

fn selections() -> impl Strategy<Value = Selections> {
    (category(), size(), material(), 1u32..=20, add_on_set()).prop_map(
        |(category, size, material, quantity, add_ons)| Selections {
            category,
            size,
            material,
            quantity,
            add_ons,
        },
    )
}

/// Random but valid pricing files, round-tripped through the loader.
fn table() -> impl Strategy<Value = PriceTable> {
    (
        proptest::collection::vec(0.0f64..1000.0, Category::COUNT * Size::COUNT),
        proptest::collection::vec(0.0f64..3.0, Material::COUNT),
        proptest::collection::vec(0.0f64..100.0, AddOn::COUNT),
    )
        .prop_map(|(base, multipliers, add_ons)| {
            let mut file = PricingConfig::default().to_file();
            for (i, &c) in Category::ALL.iter().enumerate() {
                for (j, &s) in Size::ALL.iter().enumerate() {
                    file.base
                        .get_mut(&c)
                        .unwrap()
                        .insert(s, base[i * Size::COUNT + j]);
                }
            }
            for (i, &m) in Material::ALL.iter().enumerate() {
                file.materials.insert(m, multipliers[i]);
            }
            for (i, &a) in AddOn::ALL.iter().enumerate() {
                file.add_ons.insert(a, add_ons[i]);
            }
            PriceTable::from_file(&file).unwrap()
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn faux_single_piece_equals_base(c in category(), s in size()) {
        let table = PriceTable::default();
        let selections = Selections {
            category: c,
            size: s,
            material: Material::Faux,
            quantity: 1,
            add_ons: AddOnSet::empty(),
        };
        let price = estimate(&selections, &table).unwrap();
        prop_assert_eq!(price.amount(), table.base_price(c, s));
    }

    #[test]
    fn quantity_scales_linearly(base in selections(), table in table(), n in 1u32..=20) {
        let one = estimate(&Selections { quantity: 1, ..base }, &table).unwrap();
        let many = estimate(&Selections { quantity: n, ..base }, &table).unwrap();
        prop_assert_eq!(many.amount(), one.amount() * f64::from(n));
    }

    #[test]
    fn more_pieces_never_cost_less(base in selections(), table in table(), n in 1u32..20) {
        let fewer = estimate(&Selections { quantity: n, ..base }, &table).unwrap();
        let more = estimate(&Selections { quantity: n + 1, ..base }, &table).unwrap();
        prop_assert!(more.amount() >= fewer.amount());
    }

    #[test]
    fn add_on_adds_its_price_per_piece(base in selections(), table in table(), extra in add_on()) {
        let mut without = base;
        without.add_ons.remove(extra);
        let mut with = base;
        with.add_ons.insert(extra);

        let lo = estimate(&without, &table).unwrap().amount();
        let hi = estimate(&with, &table).unwrap().amount();

        prop_assert!(hi >= lo);
        let expected = table.add_on_price(extra) * f64::from(base.quantity);
        prop_assert!(close(hi - lo, expected), "{} - {} != {}", hi, lo, expected);
    }

    #[test]
    fn never_negative(s in selections(), table in table()) {
        prop_assert!(estimate(&s, &table).unwrap().amount() >= 0.0);
    }

    #[test]
    fn deterministic(s in selections(), table in table()) {
        let a = estimate(&s, &table).unwrap();
        let b = estimate(&s.clone(), &table.clone()).unwrap();
        prop_assert_eq!(a.amount().to_bits(), b.amount().to_bits());
    }

    #[test]
    fn unknown_category_never_prices(name in "[a-z]{1,12}") {
        prop_assume!(Category::ALL.iter().all(|c| c.key() != name));
        let form = OrderForm {
            category: name,
            size: "small".to_string(),
            material: "faux".to_string(),
            quantity: Some("1".to_string()),
            add_ons: vec![],
        };
        let q = quote(&form, &PricingConfig::default());
        prop_assert!(matches!(q, Quote::Unavailable(EstimateError::InvalidSelection(_))));
    }

    #[test]
    fn clamped_quantity_is_always_in_bounds(raw in ".{0,8}") {
        let rules = QuantityRules::default();
        let q = rules.resolve(Some(&raw)).unwrap();
        prop_assert!(rules.bounds.contains(q));
    }
}

#[test]
fn holiday_category_is_invalid_selection() {
    let form = OrderForm {
        category: "holiday".to_string(),
        size: "medium".to_string(),
        material: "faux".to_string(),
        quantity: None,
        add_ons: vec![],
    };
    let q = quote(&form, &PricingConfig::default());
    assert!(q.price().is_none());
    assert!(matches!(
        q,
        Quote::Unavailable(EstimateError::InvalidSelection(_))
    ));
}
