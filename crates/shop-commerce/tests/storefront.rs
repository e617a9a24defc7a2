//! End-to-end storefront behaviour: listing, cart and wishlist flows over
//! the demo catalog, with snapshots written to a real directory.

use shop_cache::{Cache, FileBackend, MemoryBackend};
use shop_commerce::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn single_size_product() -> Product {
    Product::new(100, "Product A", Money::inr(1000), "Shirts")
        .with_variant(Variant::new("White", "#FFFFFF").with_size("M", Money::inr(1000), 2))
}

fn memory_cart() -> (CartStore<MemoryBackend>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(
        Cache::new(MemoryBackend::new()),
        cart_key(),
        PricingPolicy::default(),
        notifier.clone(),
    );
    (store, notifier)
}

#[test]
fn featured_with_no_filters_is_identity() {
    let catalog = Catalog::demo().unwrap();
    let listing = apply(catalog.products(), &FilterState::new());
    let ids: Vec<_> = listing.iter().map(|p| p.id).collect();
    let expected: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_result_satisfies_every_predicate() {
    let catalog = Catalog::demo().unwrap();
    let states = [
        FilterState::new().with_category("pants").with_size("36"),
        FilterState::new().with_color("navy").with_price(2000, 5000),
        FilterState::new().with_size("uk 10").with_color("red"),
        FilterState::new()
            .with_category("shirts")
            .with_category("knitwear")
            .with_color("grey"),
    ];

    for state in &states {
        let listing = apply(catalog.products(), state);
        assert!(!listing.is_empty(), "{:?} matched nothing", state);
        for product in listing {
            assert!(state.matches_category(product));
            assert!(state.matches_color(product));
            assert!(state.matches_size(product));
            assert!(state.matches_flag(product));
            assert!(state.matches_price(product));
        }
    }
}

#[test]
fn flag_filters_select_merchandised_products() {
    let catalog = Catalog::demo().unwrap();
    let ids = |state: &FilterState| -> Vec<u32> {
        apply(catalog.products(), state).iter().map(|p| p.id.get()).collect()
    };

    assert_eq!(ids(&FilterState::new().with_flag(ProductFlag::New)), vec![5, 12]);
    assert_eq!(
        ids(&FilterState::new()
            .with_flag(ProductFlag::BestSeller)
            .with_flag(ProductFlag::Trending)),
        vec![1, 9]
    );
    assert_eq!(
        ids(&FilterState::new().with_flag(ProductFlag::New).with_category("footwear")),
        vec![5]
    );
}

#[test]
fn size_filter_ignores_sold_out_sizes() {
    let catalog = Catalog::demo().unwrap();
    // Sneakers are the only product in UK sizes; red UK 10 is sold out but
    // white and black UK 10 are not.
    let listing = apply(catalog.products(), &FilterState::new().with_size("UK 10"));
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "Casual Sneakers");
}

#[test]
fn price_sorts_reverse_without_ties() {
    let catalog = Catalog::demo().unwrap();
    // Pick one product per distinct base price so there are no ties.
    let mut seen = std::collections::HashSet::new();
    let distinct: Vec<Product> = catalog
        .products()
        .iter()
        .filter(|p| seen.insert(p.base_price.amount))
        .cloned()
        .collect();

    let asc: Vec<_> = apply(&distinct, &FilterState::new().with_sort(SortKey::PriceAsc))
        .iter()
        .map(|p| p.id)
        .collect();
    let mut desc: Vec<_> = apply(&distinct, &FilterState::new().with_sort(SortKey::PriceDesc))
        .iter()
        .map(|p| p.id)
        .collect();
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn listing_pages_and_facets() {
    let catalog = Catalog::demo().unwrap();
    let state = FilterState::new().with_color("black");
    let listing = apply(catalog.products(), &state);

    let facets = FacetCounts::compute(listing.iter().copied(), &state);
    let black = facets.colors.iter().find(|c| c.id.as_str() == "black").unwrap();
    assert_eq!(black.count, listing.len());
    assert!(black.selected);

    let page = Page::of(listing, 2, 4);
    assert_eq!(page.pagination.page, 2);
    assert!(page.len() <= 4);
}

#[test]
fn worked_cart_scenario() {
    let (mut store, notifier) = memory_cart();
    let product = single_size_product();

    store.add(CartItem::new(product.clone(), 0, 0, 1)).unwrap();
    let totals = *store.cart().totals();
    assert_eq!(store.cart().items().len(), 1);
    assert_eq!(totals.subtotal.amount, 1000);
    assert_eq!(totals.shipping.amount, 0);
    assert_eq!(totals.total.amount, 1000);

    store.add(CartItem::new(product, 0, 0, 1)).unwrap();
    assert_eq!(store.cart().items()[0].quantity, 2);
    assert_eq!(store.cart().totals().total.amount, 2000);

    let before = store.cart().clone();
    let err = store.update_quantity(0, 3).unwrap_err();
    assert!(matches!(err, CommerceError::InsufficientStock { available: 2, .. }));
    assert_eq!(store.cart(), &before);
    assert_eq!(notifier.last().unwrap().title, "Not enough stock");
}

#[test]
fn foreign_currency_line_is_rejected_whole() {
    let backend = MemoryBackend::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let usd = PricingPolicy {
        currency: Currency::USD,
        ..PricingPolicy::default()
    };
    let mut store = CartStore::open(Cache::new(backend.clone()), cart_key(), usd, notifier.clone());
    let before = store.cart().clone();

    let err = store.add(CartItem::new(single_size_product(), 0, 0, 1)).unwrap_err();
    assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    assert_eq!(store.cart(), &before);
    assert!(store.cart().items().is_empty());
    assert!(notifier.notices().is_empty());

    let reopened = CartStore::open(Cache::new(backend), cart_key(), usd, notifier);
    assert!(reopened.cart().items().is_empty());
}

#[test]
fn merge_add_yields_one_line() {
    let catalog = Catalog::demo().unwrap();
    let oxford = catalog.require(ProductId::new(1)).unwrap();
    let mut cart = Cart::new();

    cart.add(CartItem::new(oxford.clone(), 1, 1, 2)).unwrap();
    cart.add(CartItem::new(oxford.clone(), 1, 1, 3)).unwrap();

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
}

#[test]
fn totals_always_derive_from_lines() {
    let catalog = Catalog::demo().unwrap();
    let mut cart = Cart::new();
    cart.add(CartItem::new(catalog.require(ProductId::new(9)).unwrap().clone(), 0, 3, 2))
        .unwrap();
    cart.add(CartItem::new(catalog.require(ProductId::new(2)).unwrap().clone(), 1, 0, 1))
        .unwrap();
    cart.apply_coupon(Coupon::fixed("FLAT200", 200)).unwrap();

    let expected: i64 = cart
        .items()
        .iter()
        .map(|i| i.size().unwrap().price.amount * i64::from(i.quantity))
        .sum();
    let totals = cart.totals();
    assert_eq!(totals.subtotal.amount, expected);
    assert_eq!(
        totals.total.amount,
        totals.subtotal.amount - totals.discount.amount + totals.shipping.amount
    );
}

#[test]
fn wishlist_remove_absent_is_noop() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut store = WishlistStore::open(Cache::new(MemoryBackend::new()), wishlist_key(), notifier.clone());
    let catalog = Catalog::demo().unwrap();
    store.add(catalog.require(ProductId::new(5)).unwrap());
    let before = store.wishlist().clone();
    let notices = notifier.notices().len();

    assert!(store.remove(ProductId::new(42)).is_none());
    assert_eq!(store.wishlist(), &before);
    assert_eq!(notifier.notices().len(), notices);
}

#[test]
fn snapshots_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::demo().unwrap();
    let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::new());

    let (cart_before, wishlist_before) = {
        let cache = Cache::new(FileBackend::open(dir.path()).unwrap());
        let mut cart = CartStore::open(cache.clone(), cart_key(), PricingPolicy::default(), notifier.clone());
        let mut wishlist = WishlistStore::open(cache, wishlist_key(), notifier.clone());

        let mut selection = VariantSelection::new(catalog.require(ProductId::new(5)).unwrap());
        selection.select_variant(1).unwrap();
        assert!(selection.select_size("UK 9"));
        assert!(selection.increment());
        cart.add(selection.to_cart_item().unwrap()).unwrap();
        cart.add(CartItem::new(catalog.require(ProductId::new(11)).unwrap().clone(), 0, 0, 1))
            .unwrap();

        wishlist.add(catalog.require(ProductId::new(3)).unwrap());
        wishlist.add(catalog.require(ProductId::new(8)).unwrap());

        (cart.cart().clone(), wishlist.wishlist().clone())
    };

    let cache = Cache::new(FileBackend::open(dir.path()).unwrap());
    let cart = CartStore::open(cache.clone(), cart_key(), PricingPolicy::default(), notifier.clone());
    let wishlist = WishlistStore::open(cache, wishlist_key(), notifier);

    assert_eq!(cart.cart(), &cart_before);
    assert_eq!(cart.cart().items()[0].label(), "Casual Sneakers (Black, UK 9)");
    assert_eq!(cart.cart().totals().subtotal.amount, 5199 * 2 + 1799);
    assert_eq!(wishlist.wishlist(), &wishlist_before);
}

#[test]
fn subscribers_see_every_committed_change() {
    let (mut store, _) = memory_cart();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let id = store.subscribe(move |cart| {
        assert_eq!(cart.totals().item_count, cart.items().iter().map(|i| i.quantity).sum::<u32>());
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.add(CartItem::new(single_size_product(), 0, 0, 1)).unwrap();
    store.update_quantity(0, 2).unwrap();
    let _ = store.update_quantity(0, 9);
    store.clear();
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    assert!(store.unsubscribe(id));
    store.reset();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn route_paths() {
    assert_eq!(Route::Shop.path(), "/shop");
    assert_eq!(Route::Product(ProductId::new(7)).path(), "/product/7");
}
