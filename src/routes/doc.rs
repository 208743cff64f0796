use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::{CartItem, CheckoutTotals},
    dto::{
        auth::{LoginRequest, Session},
        cart::{AddToCartRequest, CartResponse, ShippingQuote, UpdateCartItemRequest},
        orders::{
            CustomerList, OrderList, PlaceOrderRequest, UpdateCustomerRequest,
            UpdateOrderStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    models::{
        Address, AppSettings, Banner, BannerType, Category, Customer, FooterColumn, FooterLink,
        FooterSettings, Order, OrderItem, OrderStatus, Page, Product, ShippingMethod, TrustBadge,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, banners, cart, categories, customers, health, images, orders, pages, params,
        products as product_routes, settings, trust_badges,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("UUID")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::toggle_category_active,
        categories::reorder_category,
        banners::list_banners,
        banners::create_banner,
        banners::update_banner,
        banners::delete_banner,
        banners::toggle_banner_active,
        banners::reorder_banner,
        trust_badges::list_trust_badges,
        trust_badges::create_trust_badge,
        trust_badges::update_trust_badge,
        trust_badges::delete_trust_badge,
        trust_badges::toggle_trust_badge_active,
        trust_badges::reorder_trust_badge,
        pages::list_pages,
        pages::get_page,
        pages::create_page,
        pages::update_page,
        pages::delete_page,
        settings::get_footer,
        settings::update_footer,
        settings::get_settings,
        settings::update_settings,
        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        orders::place_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        customers::list_customers,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        images::store_image,
        images::get_image
    ),
    components(
        schemas(
            Product,
            Category,
            Banner,
            BannerType,
            TrustBadge,
            Page,
            Address,
            ShippingMethod,
            OrderStatus,
            Order,
            OrderItem,
            Customer,
            FooterLink,
            FooterColumn,
            FooterSettings,
            AppSettings,
            CartItem,
            CheckoutTotals,
            LoginRequest,
            Session,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            UpdateCartItemRequest,
            ShippingQuote,
            CartResponse,
            PlaceOrderRequest,
            UpdateOrderStatusRequest,
            UpdateCustomerRequest,
            OrderList,
            CustomerList,
            categories::CreateCategoryRequest,
            categories::UpdateCategoryRequest,
            categories::CategoryList,
            banners::BannerListQuery,
            banners::CreateBannerRequest,
            banners::UpdateBannerRequest,
            banners::BannerList,
            trust_badges::CreateTrustBadgeRequest,
            trust_badges::UpdateTrustBadgeRequest,
            trust_badges::TrustBadgeList,
            pages::CreatePageRequest,
            pages::UpdatePageRequest,
            pages::PageList,
            settings::UpdateFooterRequest,
            settings::UpdateSettingsRequest,
            images::StoreImageRequest,
            images::ImageStored,
            params::SortOrder,
            params::ReorderDirection,
            params::ReorderRequest,
            params::ProductQuery,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartResponse>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<CustomerList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Categories", description = "Category management"),
        (name = "Banners", description = "Banner management"),
        (name = "Trust badges", description = "Trust badge management"),
        (name = "Pages", description = "Static page management"),
        (name = "Settings", description = "Footer and store settings"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Orders", description = "Checkout and order management"),
        (name = "Customers", description = "Customer records"),
        (name = "Images", description = "Base64 image store"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
