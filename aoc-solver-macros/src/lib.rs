//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::Parse;
use syn::{DeriveInput, LitInt, LitStr, parse_macro_input};

/// Highest part number `#[aoc_solver(max_parts = N)]` accepts
const MAX_PARTS: u8 = 25;

/// Derive macro generating the `Solver` implementation from `PartSolver<N>` impls
///
/// # Attributes
///
/// - `max_parts`: Required. Number of parts (1-25). Part `k` in `1..=max_parts`
///   is forwarded to `<Self as PartSolver<k>>::solve`.
///
/// # Example
///
/// ```ignore
/// use aoc_solver::{AocParser, AocSolver, PartSolver};
///
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day1;
///
/// impl AocParser for Day1 { /* ... */ }
/// impl PartSolver<1> for Day1 { /* ... */ }
/// impl PartSolver<2> for Day1 { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc_solver"))
        .ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "AocSolver derive macro requires #[aoc_solver(max_parts = N)] attribute",
            )
        })?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            let value: u8 = lit.base10_parse()?;
            if value == 0 || value > MAX_PARTS {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("max_parts must be between 1 and {MAX_PARTS}"),
                ));
            }
            max_parts = Some(value);
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute, expected `max_parts`"))
        }
    })?;

    let max_parts = max_parts
        .ok_or_else(|| syn::Error::new_spanned(attr, "missing required `max_parts` attribute"))?;

    let arms = (1..=max_parts).map(|part| {
        quote! {
            #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared),
        }
    });

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #max_parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::aoc_solver::SolveError::PartNotImplemented(part)),
                }
            }
        }
    })
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// Submits a `SolverPlugin` through `inventory`, so
/// `SolverRegistryBuilder::register_all_plugins` discovers the solver.
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2025)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["grid", "graph"])
///
/// # Requirements
///
/// The type must implement the `Solver` trait; otherwise compilation fails
/// with an unsatisfied `Solver` bound pointing at the type.
///
/// # Example
///
/// ```ignore
/// use aoc_solver::{AocSolver, AutoRegisterSolver};
///
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2025, day = 1, tags = ["2025", "simulation"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let aoc_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "AutoRegisterSolver derive macro requires #[aoc(...)] attribute",
            )
        })?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            let value: u8 = lit.base10_parse()?;
            if value == 0 || value > 25 {
                return Err(syn::Error::new(lit.span(), "day must be between 1 and 25"));
            }
            day = Some(value);
        } else if meta.path.is_ident("tags") {
            // tags = ["a", "b"]
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            let lits = content.parse_terminated(<LitStr as Parse>::parse, syn::Token![,])?;
            tags.extend(lits.iter().map(LitStr::value));
        } else {
            return Err(meta.error("unsupported aoc attribute, expected `year`, `day` or `tags`"));
        }
        Ok(())
    })?;

    let year =
        year.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `year` attribute"))?;
    let day =
        day.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `day` attribute"))?;

    Ok(quote! {
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
